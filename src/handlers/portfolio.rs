use axum::{
    extract::rejection::JsonRejection,
    http::HeaderMap,
    response::Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::database::models::{
    Align, CursorStyle, ExperienceDraft, NavbarOrientation, Portfolio, PortfolioDraft,
    Scene3dType, SkillDraft, StyleDraft,
};
use crate::database::{DatabaseManager, PortfolioRepository};
use crate::error::ApiError;
use crate::middleware::require_session;

/// GET /api/portfolio - Public read of the singleton aggregate
///
/// Creates the placeholder portfolio on first read, so the public page always
/// has something to render.
pub async fn portfolio_get() -> Result<Json<Portfolio>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let portfolio = PortfolioRepository::new(pool).fetch_or_create().await?;
    Ok(Json(portfolio))
}

/// PUT /api/portfolio - Full-replacement update (session required)
///
/// Order matters: session check, then payload validation, and only then any
/// persistence. A rejected request has no side effects.
pub async fn portfolio_put(
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Portfolio>, ApiError> {
    require_session(&headers)?;

    let Json(json) = body.map_err(|_| ApiError::invalid_json("Invalid payload"))?;
    let draft = validate_payload(json)?;

    let pool = DatabaseManager::pool().await?;
    let portfolio = PortfolioRepository::new(pool).replace(&draft).await?;
    Ok(Json(portfolio))
}

// ---------------------------------------------------------------------------
// Payload schema
//
// Everything is optional at the deserialization layer; requiredness and
// ranges are enforced by validate_payload so failures come back as keyed
// field errors instead of opaque deserializer messages. Unknown keys are
// ignored.
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PortfolioPayload {
    display_name: Option<String>,
    headline: Option<String>,
    bio: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    contact_location: Option<String>,
    skills: Vec<SkillPayload>,
    experiences: Vec<ExperiencePayload>,
    styles: Option<StylePayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SkillPayload {
    name: Option<String>,
    level: Option<f64>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExperiencePayload {
    title: Option<String>,
    company: Option<String>,
    description: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StylePayload {
    navbar_orientation: Option<String>,
    primary_color: Option<String>,
    secondary_color: Option<String>,
    accent_color: Option<String>,
    cursor_style: Option<String>,
    show_cursor: Option<bool>,
    align: Option<String>,
    #[serde(rename = "enable3DScene")]
    enable_3d_scene: Option<bool>,
    #[serde(rename = "scene3DType")]
    scene_3d_type: Option<String>,
    #[serde(rename = "scene3DColor")]
    scene_3d_color: Option<String>,
    #[serde(rename = "scene3DSpeed")]
    scene_3d_speed: Option<f64>,
}

// ---------------------------------------------------------------------------
// Validation and normalization
// ---------------------------------------------------------------------------

fn validate_payload(json: Value) -> Result<PortfolioDraft, ApiError> {
    let payload: PortfolioPayload = serde_json::from_value(json)
        .map_err(|e| ApiError::validation_error(format!("Invalid payload: {}", e), None))?;

    let mut errors: HashMap<String, String> = HashMap::new();

    let display_name = match required(payload.display_name) {
        Some(name) => name,
        None => {
            errors.insert("displayName".to_string(), "Required".to_string());
            String::new()
        }
    };

    let skills = payload
        .skills
        .into_iter()
        .enumerate()
        .map(|(i, skill)| {
            let name = required(skill.name).unwrap_or_else(|| {
                errors.insert(format!("skills[{}].name", i), "Required".to_string());
                String::new()
            });
            SkillDraft {
                name,
                level: skill.level.map(clamp_level),
                description: normalize(skill.description),
            }
        })
        .collect();

    let experiences = payload
        .experiences
        .into_iter()
        .enumerate()
        .map(|(i, exp)| {
            let title = required(exp.title).unwrap_or_else(|| {
                errors.insert(format!("experiences[{}].title", i), "Required".to_string());
                String::new()
            });
            let start_date = parse_date(exp.start_date).unwrap_or_else(|msg| {
                errors.insert(format!("experiences[{}].startDate", i), msg);
                None
            });
            let end_date = parse_date(exp.end_date).unwrap_or_else(|msg| {
                errors.insert(format!("experiences[{}].endDate", i), msg);
                None
            });
            ExperienceDraft {
                title,
                company: normalize(exp.company),
                description: normalize(exp.description),
                start_date,
                end_date,
            }
        })
        .collect();

    let styles = payload.styles.map(normalize_styles);

    if !errors.is_empty() {
        return Err(ApiError::validation_error("Invalid payload", Some(errors)));
    }

    Ok(PortfolioDraft {
        display_name,
        headline: normalize(payload.headline),
        bio: normalize(payload.bio),
        contact_email: normalize(payload.contact_email),
        contact_phone: normalize(payload.contact_phone),
        contact_location: normalize(payload.contact_location),
        skills,
        experiences,
        styles,
    })
}

fn normalize_styles(styles: StylePayload) -> StyleDraft {
    let defaults = StyleDraft::default();
    StyleDraft {
        navbar_orientation: styles
            .navbar_orientation
            .as_deref()
            .map(NavbarOrientation::parse_or_default)
            .unwrap_or(defaults.navbar_orientation),
        primary_color: normalize(styles.primary_color),
        secondary_color: normalize(styles.secondary_color),
        accent_color: normalize(styles.accent_color),
        cursor_style: styles
            .cursor_style
            .as_deref()
            .map(CursorStyle::parse_or_default)
            .unwrap_or(defaults.cursor_style),
        show_cursor: styles.show_cursor.unwrap_or(defaults.show_cursor),
        align: styles
            .align
            .as_deref()
            .map(Align::parse_or_default)
            .unwrap_or(defaults.align),
        enable_3d_scene: styles.enable_3d_scene.unwrap_or(defaults.enable_3d_scene),
        scene_3d_type: styles
            .scene_3d_type
            .as_deref()
            .map(Scene3dType::parse_or_default)
            .unwrap_or(defaults.scene_3d_type),
        scene_3d_color: normalize(styles.scene_3d_color),
        scene_3d_speed: styles
            .scene_3d_speed
            .map(|s| s.clamp(0.1, 5.0))
            .unwrap_or(defaults.scene_3d_speed),
    }
}

/// Blank optional strings become "unset", never stored as empty.
fn normalize(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn required(value: Option<String>) -> Option<String> {
    normalize(value)
}

fn clamp_level(level: f64) -> i32 {
    level.clamp(0.0, 100.0).round() as i32
}

/// Dates come in as strings: accept YYYY-MM-DD or a full RFC 3339 timestamp.
/// Blank means unset; anything unparseable is a field error.
fn parse_date(value: Option<String>) -> Result<Option<NaiveDate>, String> {
    let Some(raw) = normalize(value) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.date_naive()));
    }

    Err(format!("Invalid date: {}", raw))
}
