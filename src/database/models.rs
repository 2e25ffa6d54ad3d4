use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Fixed identifier of the singleton portfolio row. The aggregate is always
/// looked up by this key, never by "first row found".
pub const PORTFOLIO_ID: i64 = 1;

// ---------------------------------------------------------------------------
// Admin account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Style enums
//
// Stored as canonical TEXT. Unknown submitted or stored values fall back to
// the default instead of failing the request.
// ---------------------------------------------------------------------------

macro_rules! style_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }, default = $default:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Parse a submitted or stored value, falling back to the default
            /// for anything outside the domain.
            pub fn parse_or_default(s: &str) -> Self {
                match s {
                    $($text => Self::$variant,)+
                    _ => Self::default(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }
    };
}

style_enum!(NavbarOrientation {
    Horizontal => "HORIZONTAL",
    Vertical => "VERTICAL",
}, default = Horizontal);

style_enum!(CursorStyle {
    GlowWindy => "GLOW_WINDY",
    GlowStrong => "GLOW_STRONG",
    Minimal => "MINIMAL",
}, default = GlowWindy);

style_enum!(Align {
    Left => "LEFT",
    Center => "CENTER",
    Right => "RIGHT",
}, default = Left);

style_enum!(Scene3dType {
    AnimatedSphere => "ANIMATED_SPHERE",
    FloatingParticles => "FLOATING_PARTICLES",
    GeometricShapes => "GEOMETRIC_SHAPES",
    WaveMotion => "WAVE_MOTION",
}, default = AnimatedSphere);

// ---------------------------------------------------------------------------
// Row types (direct table mappings)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct PortfolioRow {
    pub id: i64,
    pub display_name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_location: Option<String>,
    pub photo_url: Option<String>,
    pub summary_snippets: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SkillRow {
    pub id: i64,
    pub portfolio_id: i64,
    pub name: String,
    pub level: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ExperienceRow {
    pub id: i64,
    pub portfolio_id: i64,
    pub title: String,
    pub company: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, FromRow)]
pub struct StyleSettingsRow {
    pub portfolio_id: i64,
    pub navbar_orientation: String,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub cursor_style: String,
    pub show_cursor: bool,
    pub align: String,
    pub enable_3d_scene: bool,
    pub scene_3d_type: String,
    pub scene_3d_color: Option<String>,
    pub scene_3d_speed: f64,
}

// ---------------------------------------------------------------------------
// Wire aggregate (GET/PUT response shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: i64,
    pub display_name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_location: Option<String>,
    pub photo_url: Option<String>,
    pub summary_snippets: Option<String>,
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
    pub styles: Option<StyleSettings>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub level: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: i64,
    pub title: String,
    pub company: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSettings {
    pub navbar_orientation: NavbarOrientation,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub cursor_style: CursorStyle,
    pub show_cursor: bool,
    pub align: Align,
    #[serde(rename = "enable3DScene")]
    pub enable_3d_scene: bool,
    #[serde(rename = "scene3DType")]
    pub scene_3d_type: Scene3dType,
    #[serde(rename = "scene3DColor")]
    pub scene_3d_color: Option<String>,
    #[serde(rename = "scene3DSpeed")]
    pub scene_3d_speed: f64,
}

impl Portfolio {
    pub fn assemble(
        row: PortfolioRow,
        skills: Vec<SkillRow>,
        experiences: Vec<ExperienceRow>,
        styles: Option<StyleSettingsRow>,
    ) -> Self {
        Self {
            id: row.id,
            display_name: row.display_name,
            headline: row.headline,
            bio: row.bio,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            contact_location: row.contact_location,
            photo_url: row.photo_url,
            summary_snippets: row.summary_snippets,
            skills: skills
                .into_iter()
                .map(|s| Skill {
                    id: s.id,
                    name: s.name,
                    level: s.level,
                    description: s.description,
                })
                .collect(),
            experiences: experiences
                .into_iter()
                .map(|e| Experience {
                    id: e.id,
                    title: e.title,
                    company: e.company,
                    description: e.description,
                    start_date: e.start_date,
                    end_date: e.end_date,
                })
                .collect(),
            styles: styles.map(StyleSettings::from),
        }
    }
}

impl From<StyleSettingsRow> for StyleSettings {
    fn from(row: StyleSettingsRow) -> Self {
        Self {
            navbar_orientation: NavbarOrientation::parse_or_default(&row.navbar_orientation),
            primary_color: row.primary_color,
            secondary_color: row.secondary_color,
            accent_color: row.accent_color,
            cursor_style: CursorStyle::parse_or_default(&row.cursor_style),
            show_cursor: row.show_cursor,
            align: Align::parse_or_default(&row.align),
            enable_3d_scene: row.enable_3d_scene,
            scene_3d_type: Scene3dType::parse_or_default(&row.scene_3d_type),
            scene_3d_color: row.scene_3d_color,
            scene_3d_speed: row.scene_3d_speed,
        }
    }
}

// ---------------------------------------------------------------------------
// Draft types: a fully validated and normalized replacement payload,
// the only input the repository's write path accepts.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioDraft {
    pub display_name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_location: Option<String>,
    pub skills: Vec<SkillDraft>,
    pub experiences: Vec<ExperienceDraft>,
    pub styles: Option<StyleDraft>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillDraft {
    pub name: String,
    pub level: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceDraft {
    pub title: String,
    pub company: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleDraft {
    pub navbar_orientation: NavbarOrientation,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub cursor_style: CursorStyle,
    pub show_cursor: bool,
    pub align: Align,
    pub enable_3d_scene: bool,
    pub scene_3d_type: Scene3dType,
    pub scene_3d_color: Option<String>,
    pub scene_3d_speed: f64,
}

impl Default for StyleDraft {
    fn default() -> Self {
        Self {
            navbar_orientation: NavbarOrientation::default(),
            primary_color: None,
            secondary_color: None,
            accent_color: None,
            cursor_style: CursorStyle::default(),
            show_cursor: true,
            align: Align::default(),
            enable_3d_scene: true,
            scene_3d_type: Scene3dType::default(),
            scene_3d_color: None,
            scene_3d_speed: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_round_trip() {
        assert_eq!(CursorStyle::parse_or_default("MINIMAL"), CursorStyle::Minimal);
        assert_eq!(CursorStyle::Minimal.as_str(), "MINIMAL");
        assert_eq!(Scene3dType::parse_or_default("WAVE_MOTION"), Scene3dType::WaveMotion);
    }

    #[test]
    fn test_enum_fallback_on_unknown_value() {
        assert_eq!(CursorStyle::parse_or_default("BOGUS"), CursorStyle::GlowWindy);
        assert_eq!(NavbarOrientation::parse_or_default(""), NavbarOrientation::Horizontal);
        assert_eq!(Align::parse_or_default("middle"), Align::Left);
        assert_eq!(Scene3dType::parse_or_default("CUBES"), Scene3dType::AnimatedSphere);
    }

    #[test]
    fn test_styles_serialize_with_3d_names() {
        let styles = StyleSettings::from(StyleSettingsRow {
            portfolio_id: PORTFOLIO_ID,
            navbar_orientation: "VERTICAL".into(),
            primary_color: None,
            secondary_color: None,
            accent_color: None,
            cursor_style: "GLOW_STRONG".into(),
            show_cursor: true,
            align: "CENTER".into(),
            enable_3d_scene: true,
            scene_3d_type: "FLOATING_PARTICLES".into(),
            scene_3d_color: Some("#fff".into()),
            scene_3d_speed: 2.5,
        });

        let v = serde_json::to_value(&styles).unwrap();
        assert_eq!(v["navbarOrientation"], "VERTICAL");
        assert_eq!(v["cursorStyle"], "GLOW_STRONG");
        assert_eq!(v["enable3DScene"], true);
        assert_eq!(v["scene3DType"], "FLOATING_PARTICLES");
        assert_eq!(v["scene3DColor"], "#fff");
        assert_eq!(v["scene3DSpeed"], 2.5);
    }
}
