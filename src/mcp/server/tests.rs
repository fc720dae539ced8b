// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::*;

fn server() -> ProteusMcp {
    ProteusMcp::new()
}

fn render_params(source: &str) -> RenderParams {
    RenderParams {
        source: source.to_owned(),
        layout: None,
        theme: None,
        dark_theme: None,
        sketch: None,
        pad: None,
        center: None,
        ascii_mode: None,
        strip_fonts: None,
    }
}

#[cfg(unix)]
fn temp_script(test_name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;
    use std::time::{SystemTime, UNIX_EPOCH};

    let mut path = std::env::temp_dir();
    let pid = std::process::id();
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).expect("clock is monotonic").as_nanos();
    path.push(format!("proteus-{test_name}-{pid}-{nanos}.sh"));
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
    path
}

#[tokio::test]
async fn render_returns_svg_by_default() {
    let response =
        server().render(Parameters(render_params("a -> b: call"))).await.expect("render");
    assert!(response.0.output.starts_with("<?xml"));
    assert_eq!(response.0.format, "svg");
    assert_eq!(response.0.chars, response.0.output.chars().count());
}

#[tokio::test]
async fn render_ascii_mode_returns_plain_text() {
    let mut params = render_params("a -> b");
    params.ascii_mode = Some(true);
    let response = server().render(Parameters(params)).await.expect("render");
    assert_eq!(response.0.format, "ascii");
    assert!(!response.0.output.contains("<?xml"));
    assert!(response.0.output.contains("| a |"));
}

#[tokio::test]
async fn render_rejects_empty_source() {
    let err = server().render(Parameters(render_params("   \n"))).await.err().expect("rejected");
    assert!(err.message.contains("non-empty"));
}

#[tokio::test]
async fn render_rejects_unknown_theme_before_compiling() {
    let srv = server();
    let mut params = render_params("a -> b");
    params.theme = Some(999);
    let err = srv.render(Parameters(params)).await.err().expect("rejected");
    assert!(err.message.contains("unknown theme id: 999"));
    assert!(!srv.runtime().engine_initialized());
}

#[tokio::test]
async fn render_rejects_unknown_dark_theme() {
    let mut params = render_params("a -> b");
    params.dark_theme = Some(7);
    let err = server().render(Parameters(params)).await.err().expect("rejected");
    assert!(err.message.contains("unknown dark theme id: 7"));
}

#[tokio::test]
async fn render_surfaces_syntax_errors_as_invalid_params() {
    let err = server().render(Parameters(render_params("-> b"))).await.err().expect("rejected");
    assert!(err.message.contains("line 1"));
}

#[tokio::test]
async fn render_strip_fonts_removes_font_face_blocks() {
    let srv = server();
    let plain =
        srv.render(Parameters(render_params("a -> b"))).await.expect("render").0.output;
    assert!(plain.contains("@font-face"));

    let mut params = render_params("a -> b");
    params.strip_fonts = Some(true);
    let stripped = srv.render(Parameters(params)).await.expect("render").0.output;
    assert!(!stripped.contains("@font-face"));
    assert!(stripped.len() < plain.len());
}

#[tokio::test]
async fn render_withholds_oversized_output() {
    let label = "x".repeat(120);
    let source: String =
        (0..800).map(|i| format!("n{i}: {label}\n")).collect();

    let err = server().render(Parameters(render_params(&source))).await.err().expect("over cap");
    assert!(err.message.contains("characters"));
    assert!(err.message.contains("ascii_mode"));
    assert!(!err.message.contains(&label));
}

#[test]
fn render_params_reject_unknown_fields() {
    let value = serde_json::json!({ "source": "a -> b", "zoom": 2 });
    let err = serde_json::from_value::<RenderParams>(value).expect_err("rejected");
    assert!(err.to_string().contains("zoom"));
}

#[test]
fn unknown_field_is_rejected_without_waking_the_engine() {
    let srv = server();
    let value = serde_json::json!({ "source": "a -> b", "wobble": true });
    assert!(serde_json::from_value::<RenderParams>(value).is_err());
    assert!(!srv.runtime().engine_initialized());
}

#[tokio::test]
async fn validate_reports_valid_source() {
    let response =
        server().validate(Parameters(ValidateParams { source: "a -> b".into() })).await.expect("validate");
    assert!(response.0.valid);
    assert!(response.0.error.is_none());

    let json = serde_json::to_value(&response.0).expect("serialize");
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn validate_reports_syntax_error_without_failing_the_call() {
    let response =
        server().validate(Parameters(ValidateParams { source: "a ->".into() })).await.expect("validate");
    assert!(!response.0.valid);
    let error = response.0.error.expect("diagnostic");
    assert!(error.contains("line 1"));
}

#[tokio::test]
async fn validate_rejects_empty_source() {
    let err = server()
        .validate(Parameters(ValidateParams { source: String::new() }))
        .await
        .err().expect("rejected");
    assert!(err.message.contains("non-empty"));
}

#[tokio::test]
async fn format_reports_missing_binary_with_override_hint() {
    let srv = ProteusMcp::with_parts(
        Arc::new(Runtime::new()),
        Formatter::with_binary("proteus-no-such-d2"),
    );
    let err = srv
        .format(Parameters(FormatParams { source: "a -> b".into() }))
        .await
        .err().expect("missing binary");
    assert!(err.message.contains("D2_BIN"));
    assert!(err.message.contains("https://d2lang.com/tour/install"));
}

#[cfg(unix)]
#[tokio::test]
async fn format_returns_formatter_stdout() {
    let script = temp_script("fmt-ok", "cat");
    let srv = ProteusMcp::with_parts(
        Arc::new(Runtime::new()),
        Formatter::with_binary(script.to_string_lossy().into_owned()),
    );
    let response = srv
        .format(Parameters(FormatParams { source: "a->b".into() }))
        .await
        .expect("format");
    assert_eq!(response.0.formatted, "a->b");
    let _ = std::fs::remove_file(script);
}

#[cfg(unix)]
#[tokio::test]
async fn format_surfaces_nonzero_exit_with_stderr() {
    let script = temp_script("fmt-err", "echo 'bad syntax' >&2; exit 3");
    let srv = ProteusMcp::with_parts(
        Arc::new(Runtime::new()),
        Formatter::with_binary(script.to_string_lossy().into_owned()),
    );
    let err = srv
        .format(Parameters(FormatParams { source: "a->b".into() }))
        .await
        .err().expect("exit 3");
    assert!(err.message.contains("exit 3"));
    assert!(err.message.contains("bad syntax"));
    let _ = std::fs::remove_file(script);
}

#[tokio::test]
async fn format_rejects_empty_source() {
    let err = server()
        .format(Parameters(FormatParams { source: " ".into() }))
        .await
        .err().expect("rejected");
    assert!(err.message.contains("non-empty"));
}

#[tokio::test]
async fn list_themes_includes_default_and_dark_flagship() {
    let response = server().list_themes(Parameters(ListThemesParams {})).await.expect("themes");
    assert!(response.0.light.iter().any(|t| t.id == 0));
    assert!(response.0.dark.iter().any(|t| t.id == 200));
    assert!(response.0.light.len() > response.0.dark.len());
}

#[tokio::test]
async fn list_layouts_names_both_engines() {
    let response =
        server().list_layouts(Parameters(ListLayoutsParams {})).await.expect("layouts");
    let names: Vec<&str> = response.0.layouts.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["dagre", "elk"]);
    assert!(response.0.layouts.iter().all(|l| !l.description.is_empty()));
}

#[test]
fn get_info_advertises_tools() {
    let info = server().get_info();
    let instructions = info.instructions.expect("instructions");
    for tool in ["render", "validate", "format", "list-themes", "list-layouts"] {
        assert!(instructions.contains(tool), "missing {tool}");
    }
}
