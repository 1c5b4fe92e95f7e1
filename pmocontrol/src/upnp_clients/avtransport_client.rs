use pmoconfig::Config;
use pmosoap::ResponseContent;
use pmosoap::payloads::{
    GetMediaInfo, GetPositionInfo, GetTransportInfo, MediaInfoResponse, Next, Pause, Play,
    PlaybackStateResponse, PositionInfoResponse, Previous, Seek, SetAvTransportUri, Stop,
};
use pmosoap::time_utils::format_hhmmss;
use tracing::debug;

use crate::config_ext::{ControlConfigExt, DEFAULT_AVTRANSPORT_PATH};
use crate::errors::ControlPointError;
use crate::soap_client::SoapClient;
use crate::upnp_clients::{expect_acknowledgement, expect_content};

#[derive(Debug, Clone)]
pub struct AvTransportClient {
    pub base_url: String,
    pub control_path: String,
    soap: SoapClient,
}

impl AvTransportClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            control_path: DEFAULT_AVTRANSPORT_PATH.to_string(),
            soap: SoapClient::default(),
        }
    }

    pub fn from_config(base_url: impl Into<String>, config: &Config) -> Self {
        let control_path = config
            .get_avtransport_control_path()
            .unwrap_or_else(|_| DEFAULT_AVTRANSPORT_PATH.to_string());
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

    fn acknowledge<T: pmosoap::UpnpAction>(&self, payload: &T) -> Result<(), ControlPointError> {
        let body = self.soap.invoke(&self.base_url, &self.control_path, payload)?;
        expect_acknowledgement(T::ACTION, body)
    }

    /// AVTransport:1 — Play
    pub fn play(&self, instance_id: u32, speed: &str) -> Result<(), ControlPointError> {
        self.acknowledge(&Play::new(instance_id, speed.to_string()))
    }

    /// AVTransport:1 — Pause
    pub fn pause(&self, instance_id: u32) -> Result<(), ControlPointError> {
        self.acknowledge(&Pause::new(instance_id))
    }

    /// AVTransport:1 — Stop
    pub fn stop(&self, instance_id: u32) -> Result<(), ControlPointError> {
        self.acknowledge(&Stop::new(instance_id))
    }

    /// AVTransport:1 — Next
    pub fn next(&self, instance_id: u32) -> Result<(), ControlPointError> {
        self.acknowledge(&Next::new(instance_id))
    }

    /// AVTransport:1 — Previous
    pub fn previous(&self, instance_id: u32) -> Result<(), ControlPointError> {
        self.acknowledge(&Previous::new(instance_id))
    }

    /// AVTransport:1 — Seek
    pub fn seek(&self, instance_id: u32, unit: &str, target: &str) -> Result<(), ControlPointError> {
        debug!(instance_id, unit, target, "Seek");
        self.acknowledge(&Seek::new(instance_id, unit.to_string(), target.to_string()))
    }

    /// Seek en `REL_TIME` vers une position exprimée en secondes
    pub fn seek_rel_time(&self, instance_id: u32, seconds: u32) -> Result<(), ControlPointError> {
        self.seek(instance_id, "REL_TIME", &format_hhmmss(seconds))
    }

    /// AVTransport:1 — SetAVTransportURI
    pub fn set_av_transport_uri(
        &self,
        instance_id: u32,
        uri: &str,
        meta_data: &str,
    ) -> Result<(), ControlPointError> {
        if uri.trim().is_empty() {
            return Err(ControlPointError::invalid_value("CurrentURI", uri));
        }
        self.acknowledge(&SetAvTransportUri::new(
            instance_id,
            uri.to_string(),
            meta_data.to_string(),
        ))
    }

    /// AVTransport:1 — GetTransportInfo
    pub fn get_transport_info(
        &self,
        instance_id: u32,
    ) -> Result<PlaybackStateResponse, ControlPointError> {
        let body = self.soap.invoke(
            &self.base_url,
            &self.control_path,
            &GetTransportInfo::new(instance_id),
        )?;
        expect_content(
            "GetTransportInfo",
            "PlaybackState",
            body,
            ResponseContent::into_playback_state,
        )
    }

    /// AVTransport:1 — GetPositionInfo
    pub fn get_position_info(
        &self,
        instance_id: u32,
    ) -> Result<PositionInfoResponse, ControlPointError> {
        let body = self.soap.invoke(
            &self.base_url,
            &self.control_path,
            &GetPositionInfo::new(instance_id),
        )?;
        expect_content(
            "GetPositionInfo",
            "PositionInfo",
            body,
            ResponseContent::into_position_info,
        )
    }

    /// AVTransport:1 — GetMediaInfo
    pub fn get_media_info(&self, instance_id: u32) -> Result<MediaInfoResponse, ControlPointError> {
        let body = self.soap.invoke(
            &self.base_url,
            &self.control_path,
            &GetMediaInfo::new(instance_id),
        )?;
        expect_content(
            "GetMediaInfo",
            "MediaInfo",
            body,
            ResponseContent::into_media_info,
        )
    }
}
