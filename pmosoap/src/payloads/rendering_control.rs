//! RenderingControl:1 — volume et sourdine

use serde::Deserialize;

use crate::RENDERING_CONTROL;

upnp_request! {
    /// RenderingControl:1 — GetVolume
    GetVolume(RENDERING_CONTROL, "GetVolume", "u:GetVolume") {
        instance_id: u32 => "InstanceID",
        channel: String => "Channel",
    }
}

upnp_request! {
    /// RenderingControl:1 — SetVolume
    SetVolume(RENDERING_CONTROL, "SetVolume", "u:SetVolume") {
        instance_id: u32 => "InstanceID",
        channel: String => "Channel",
        desired_volume: u16 => "DesiredVolume",
    }
}

upnp_request! {
    /// RenderingControl:1 — GetMute
    GetMute(RENDERING_CONTROL, "GetMute", "u:GetMute") {
        instance_id: u32 => "InstanceID",
        channel: String => "Channel",
    }
}

upnp_request! {
    /// RenderingControl:1 — SetMute
    SetMute(RENDERING_CONTROL, "SetMute", "u:SetMute") {
        instance_id: u32 => "InstanceID",
        channel: String => "Channel",
        #[serde(with = "super::upnp_bool")]
        desired_mute: bool => "DesiredMute",
    }
}

/// Réponse à GetVolume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct VolumeResponse {
    #[serde(rename = "CurrentVolume")]
    pub current_volume: u16,
}

/// Réponse à GetMute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MuteResponse {
    #[serde(rename = "CurrentMute", with = "super::upnp_bool")]
    pub current_mute: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_response_ignores_namespace_prefix() {
        let xml = r#"<u:GetVolumeResponse xmlns:u="urn:schemas-upnp-org:service:RenderingControl:1">
            <CurrentVolume>27</CurrentVolume>
        </u:GetVolumeResponse>"#;
        let response: VolumeResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(response.current_volume, 27);
    }

    #[test]
    fn mute_response_accepts_numeric_and_textual_booleans() {
        let on: MuteResponse =
            quick_xml::de::from_str("<r><CurrentMute>1</CurrentMute></r>").unwrap();
        let off: MuteResponse =
            quick_xml::de::from_str("<r><CurrentMute>false</CurrentMute></r>").unwrap();
        assert!(on.current_mute);
        assert!(!off.current_mute);

        let bad = quick_xml::de::from_str::<MuteResponse>("<r><CurrentMute>2</CurrentMute></r>");
        assert!(bad.is_err());
    }

    #[test]
    fn set_mute_serializes_upnp_boolean() {
        let xml = quick_xml::se::to_string(&SetMute::new(0, "Master".into(), true)).unwrap();
        assert!(xml.contains("<DesiredMute>1</DesiredMute>"), "{xml}");
        assert!(xml.starts_with("<u:SetMute xmlns:u=\"urn:schemas-upnp-org:service:RenderingControl:1\">"));
    }
}
