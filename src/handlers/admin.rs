use axum::response::Html;

/// GET /hiddenpage - Admin editor shell (behind the session guard)
///
/// The editor itself is a client-side form that talks to /api/portfolio;
/// this handler only serves the shell for it.
pub async fn editor_get() -> Html<&'static str> {
    Html(EDITOR_SHELL)
}

const EDITOR_SHELL: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="robots" content="noindex">
  <title>Portfolio Editor</title>
</head>
<body>
  <main id="editor" data-portfolio-endpoint="/api/portfolio">
    <h1>Portfolio Editor</h1>
    <noscript>The editor requires JavaScript.</noscript>
  </main>
</body>
</html>
"#;
