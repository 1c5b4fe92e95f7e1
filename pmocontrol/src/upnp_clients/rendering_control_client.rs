use pmoconfig::Config;
use pmosoap::ResponseContent;
use pmosoap::payloads::{GetMute, GetVolume, SetMute, SetVolume};
use tracing::debug;

use crate::config_ext::{ControlConfigExt, DEFAULT_RENDERING_CONTROL_PATH};
use crate::errors::ControlPointError;
use crate::soap_client::SoapClient;
use crate::upnp_clients::{expect_acknowledgement, expect_content};

#[derive(Debug, Clone)]
pub struct RenderingControlClient {
    pub base_url: String,
    pub control_path: String,
    soap: SoapClient,
}

impl RenderingControlClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            control_path: DEFAULT_RENDERING_CONTROL_PATH.to_string(),
            soap: SoapClient::default(),
        }
    }

    /// Client configuré : chemin de contrôle et options SOAP lus dans `config`
    pub fn from_config(base_url: impl Into<String>, config: &Config) -> Self {
        let control_path = config
            .get_rendering_control_path()
            .unwrap_or_else(|_| DEFAULT_RENDERING_CONTROL_PATH.to_string());
        Self {
            base_url: base_url.into(),
            control_path,
            soap: SoapClient::from_config(config),
        }
    }

    pub fn with_control_path(mut self, control_path: impl Into<String>) -> Self {
        self.control_path = control_path.into();
        self
    }

    pub fn with_soap_client(mut self, soap: SoapClient) -> Self {
        self.soap = soap;
        self
    }

    /// RenderingControl:1 — GetVolume
    pub fn get_volume(&self, instance_id: u32, channel: &str) -> Result<u16, ControlPointError> {
        debug!(instance_id, channel, "GetVolume");
        let body = self.soap.invoke(
            &self.base_url,
            &self.control_path,
            &GetVolume::new(instance_id, channel.to_string()),
        )?;

        expect_content("GetVolume", "Volume", body, ResponseContent::into_volume)
            .map(|response| response.current_volume)
    }

    /// RenderingControl:1 — SetVolume
    ///
    /// Les renderers exposent un volume entre 0 et 100.
    pub fn set_volume(
        &self,
        instance_id: u32,
        channel: &str,
        volume: u16,
    ) -> Result<(), ControlPointError> {
        if volume > 100 {
            return Err(ControlPointError::invalid_value(
                "DesiredVolume",
                &volume.to_string(),
            ));
        }

        let body = self.soap.invoke(
            &self.base_url,
            &self.control_path,
            &SetVolume::new(instance_id, channel.to_string(), volume),
        )?;

        expect_acknowledgement("SetVolume", body)
    }

    /// RenderingControl:1 — GetMute
    pub fn get_mute(&self, instance_id: u32, channel: &str) -> Result<bool, ControlPointError> {
        let body = self.soap.invoke(
            &self.base_url,
            &self.control_path,
            &GetMute::new(instance_id, channel.to_string()),
        )?;

        expect_content("GetMute", "Mute", body, ResponseContent::into_mute)
            .map(|response| response.current_mute)
    }

    /// RenderingControl:1 — SetMute
    pub fn set_mute(
        &self,
        instance_id: u32,
        channel: &str,
        mute: bool,
    ) -> Result<(), ControlPointError> {
        let body = self.soap.invoke(
            &self.base_url,
            &self.control_path,
            &SetMute::new(instance_id, channel.to_string(), mute),
        )?;

        expect_acknowledgement("SetMute", body)
    }
}
