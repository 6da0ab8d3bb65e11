#![cfg(feature = "serde")]

use re_outlines::{
    HiddenMaterialOverride, LayerMask, MaterialId, ObjectSettings, OutlineFlags, OutlineSettings,
    OutlineSize, PassConfiguration, RenderPassEvent, ShaderId,
};

fn custom_settings() -> OutlineSettings {
    OutlineSettings {
        color: ecolor::Rgba::from_rgba_premultiplied(0.25, 0.5, 0.75, 1.0),
        outline_size: OutlineSize::new(1).unwrap(),
        flags: OutlineFlags::USE_DEPTH | OutlineFlags::SHOW_HIDDEN | OutlineFlags::PRECISE,
        alpha_cutoff: 0.125,
        shader_passes: vec![vec![0, 2], vec![], vec![1]],
    }
}

#[test]
fn pass_configuration_round_trip() {
    let config = PassConfiguration {
        render_pass_event: RenderPassEvent::BeforePostProcessing,
        outline_shader: Some(ShaderId(11)),
        mask_shader: Some(ShaderId(12)),
        hidden_material: Some(MaterialId(13)),
        layer_mask: LayerMask(0b1010),
        outline: custom_settings(),
    };

    let json = config.to_json().unwrap();
    similar_asserts::assert_eq!(PassConfiguration::from_json(&json).unwrap(), config);
}

#[test]
fn object_settings_round_trip() {
    for settings in [
        ObjectSettings::Inherited,
        ObjectSettings::explicit(custom_settings()),
        ObjectSettings::Explicit {
            settings: OutlineSettings::default(),
            hidden_material: HiddenMaterialOverride {
                enabled: true,
                material: Some(MaterialId(3)),
            },
        },
    ] {
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: ObjectSettings = serde_json::from_str(&json).unwrap();
        similar_asserts::assert_eq!(loaded, settings);
    }
}

#[test]
fn explicit_settings_without_hidden_override() {
    let loaded: ObjectSettings =
        serde_json::from_str(r#"{ "Explicit": { "settings": { "outline_size": 0 } } }"#).unwrap();

    assert_eq!(
        loaded,
        ObjectSettings::Explicit {
            settings: OutlineSettings {
                outline_size: OutlineSize::MIN,
                ..Default::default()
            },
            hidden_material: HiddenMaterialOverride::default(),
        }
    );
}

#[test]
fn malformed_json_is_an_error() {
    assert!(PassConfiguration::from_json("{ not json").is_err());
    assert!(PassConfiguration::from_json(r#"{ "layer_mask": -1 }"#).is_err());
}
