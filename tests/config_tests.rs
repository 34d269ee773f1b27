// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use yuv2rgb_shader::shaders::ShaderFormat;
use yuv2rgb_shader::{Config, ConfigError, ScalingFallback};

#[test]
fn test_config_default() {
    // Test that default config can be created
    let config = Config::default();

    // Check sensible defaults
    assert!(
        !config.gl_rectangle_hack,
        "Rectangle workaround should be off by default"
    );
    assert_eq!(config.unsupported_scaling, ScalingFallback::Fallback);
    assert!(config.shader_dir.is_none());
}

#[test]
fn test_config_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shaders.json");
    std::fs::write(
        &path,
        r#"{ "gl_rectangle_hack": true, "unsupported_scaling": "reject", "shader_dir": "/tmp/glsl" }"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert!(config.gl_rectangle_hack);
    assert_eq!(config.unsupported_scaling, ScalingFallback::Reject);
    assert_eq!(config.shader_dir.as_deref(), Some(std::path::Path::new("/tmp/glsl")));
}

#[test]
fn test_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_config_round_trips_through_json() {
    let config = Config {
        gl_rectangle_hack: true,
        unsupported_scaling: ScalingFallback::Reject,
        shader_dir: None,
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json_str(&json).unwrap(), config);
}

#[test]
fn test_rectangle_hack_reaches_defines() {
    let config = Config {
        gl_rectangle_hack: true,
        ..Default::default()
    };
    let shader = config.shader_config(ShaderFormat::Yv12, false, true);
    let defines = yuv2rgb_shader::shaders::build_defines(&shader, None);
    assert!(defines.contains("#define XBMC_texture_rectangle_hack 1\n"));
    assert!(defines.contains("#define XBMC_STRETCH 1\n"));
}
