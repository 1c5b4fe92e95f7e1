//! Échanges HTTP complets contre un renderer simulé (mockito)

use std::sync::Arc;

use mockito::{Matcher, Server};
use pmocontrol::{
    AvTransportClient, ControlPointError, MASTER_CHANNEL, RenderingControlClient, ResponseBody,
    SoapClient, SoapClientOptions,
};
use pmosoap::payloads::{GetTransportInfo, TransportState};
use pmosoap::{CollectingDiagnostics, Diagnostic, RENDERING_CONTROL, error_codes};

const RC_PATH: &str = "/MediaRenderer/RenderingControl/Control";
const AVT_PATH: &str = "/MediaRenderer/AVTransport/Control";

fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
<s:Body>{body}</s:Body>
</s:Envelope>"#
    )
}

fn upnp_fault(code: u32) -> String {
    envelope(&format!(
        r#"<s:Fault>
<faultcode>s:Client</faultcode>
<faultstring>UPnPError</faultstring>
<detail><UPnPError xmlns="urn:schemas-upnp-org:control-1-0"><errorCode>{code}</errorCode></UPnPError></detail>
</s:Fault>"#
    ))
}

#[test]
fn get_volume_round_trip() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", RC_PATH)
        .match_header(
            "soapaction",
            "urn:schemas-upnp-org:service:RenderingControl:1#GetVolume",
        )
        .match_header("content-type", r#"text/xml; charset="utf-8""#)
        .match_header("user-agent", "PMOSoap/0.1 UPnP/1.0")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("<InstanceID>0</InstanceID>".into()),
            Matcher::Regex("<Channel>Master</Channel>".into()),
        ]))
        .with_status(200)
        .with_header("content-type", r#"text/xml; charset="utf-8""#)
        .with_body(envelope(
            r#"<u:GetVolumeResponse xmlns:u="urn:schemas-upnp-org:service:RenderingControl:1"><CurrentVolume>42</CurrentVolume></u:GetVolumeResponse>"#,
        ))
        .create();

    let client = RenderingControlClient::new(server.url());
    assert_eq!(client.get_volume(0, MASTER_CHANNEL).unwrap(), 42);
    mock.assert();
}

#[test]
fn set_volume_acknowledged() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", RC_PATH)
        .match_body(Matcher::Regex("<DesiredVolume>25</DesiredVolume>".into()))
        .with_status(200)
        .with_body(envelope(
            r#"<u:SetVolumeResponse xmlns:u="urn:schemas-upnp-org:service:RenderingControl:1"/>"#,
        ))
        .create();

    let client = RenderingControlClient::new(server.url());
    client.set_volume(0, MASTER_CHANNEL, 25).unwrap();
    mock.assert();
}

#[test]
fn out_of_range_volume_is_never_sent() {
    let mut server = Server::new();
    let mock = server.mock("POST", RC_PATH).expect(0).create();

    let client = RenderingControlClient::new(server.url());
    let err = client.set_volume(0, MASTER_CHANNEL, 150).unwrap_err();
    assert!(matches!(err, ControlPointError::InvalidValue(..)));
    mock.assert();
}

#[test]
fn get_mute_reads_upnp_boolean() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", RC_PATH)
        .with_status(200)
        .with_body(envelope(
            r#"<u:GetMuteResponse xmlns:u="urn:schemas-upnp-org:service:RenderingControl:1"><CurrentMute>1</CurrentMute></u:GetMuteResponse>"#,
        ))
        .create();

    let client = RenderingControlClient::new(server.url());
    assert!(client.get_mute(0, MASTER_CHANNEL).unwrap());
    mock.assert();
}

#[test]
fn http_500_is_a_status_error_even_with_a_fault_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", AVT_PATH)
        .with_status(500)
        .with_body(upnp_fault(error_codes::TRANSITION_NOT_AVAILABLE))
        .create();

    let client = AvTransportClient::new(server.url());
    let err = client.play(0, "1").unwrap_err();
    assert!(
        matches!(err, ControlPointError::Status { status: 500, .. }),
        "{err:?}"
    );
    mock.assert();
}

#[test]
fn fault_with_status_200_is_reported_with_its_upnp_code() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", AVT_PATH)
        .match_header("soapaction", "urn:schemas-upnp-org:service:AVTransport:1#Pause")
        .with_status(200)
        .with_body(upnp_fault(error_codes::TRANSITION_NOT_AVAILABLE))
        .create();

    let client = AvTransportClient::new(server.url());
    let err = client.pause(0).unwrap_err();
    assert_eq!(
        err.upnp_error_code(),
        Some(error_codes::TRANSITION_NOT_AVAILABLE)
    );
    match err {
        ControlPointError::Fault { action, fault } => {
            assert_eq!(action, "Pause");
            assert_eq!(fault.code.as_deref(), Some("s:Client"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    mock.assert();
}

#[test]
fn malformed_body_is_a_decode_error() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", AVT_PATH)
        .with_status(200)
        .with_body("<html><body>It works!</body></html>")
        .create();

    let client = AvTransportClient::new(server.url());
    let err = client.get_transport_info(0).unwrap_err();
    assert!(matches!(err, ControlPointError::Decode { .. }), "{err:?}");
    mock.assert();
}

#[test]
fn invalid_base_url_is_a_construction_error() {
    let client = AvTransportClient::new("not a url");
    let err = client.stop(0).unwrap_err();
    assert!(matches!(err, ControlPointError::Construction(_)), "{err:?}");
}

#[test]
fn unreachable_device_is_a_transport_error() {
    let client = AvTransportClient::new("http://127.0.0.1:1");
    let err = client.stop(0).unwrap_err();
    assert!(matches!(err, ControlPointError::Transport { .. }), "{err:?}");
}

#[test]
fn position_and_transport_info() {
    let mut server = Server::new();
    let position = server
        .mock("POST", AVT_PATH)
        .match_header(
            "soapaction",
            "urn:schemas-upnp-org:service:AVTransport:1#GetPositionInfo",
        )
        .with_status(200)
        .with_body(envelope(
            r#"<u:GetPositionInfoResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">
<Track>2</Track><TrackDuration>0:05:00</TrackDuration><RelTime>0:01:30</RelTime>
</u:GetPositionInfoResponse>"#,
        ))
        .create();
    let transport = server
        .mock("POST", AVT_PATH)
        .match_header(
            "soapaction",
            "urn:schemas-upnp-org:service:AVTransport:1#GetTransportInfo",
        )
        .with_status(200)
        .with_body(envelope(
            r#"<u:GetTransportInfoResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">
<CurrentTransportState>PLAYING</CurrentTransportState>
<CurrentTransportStatus>OK</CurrentTransportStatus>
<CurrentSpeed>1</CurrentSpeed>
</u:GetTransportInfoResponse>"#,
        ))
        .create();

    let client = AvTransportClient::new(server.url());

    let info = client.get_position_info(0).unwrap();
    assert_eq!(info.track, 2);
    assert_eq!(info.rel_time_secs(), Some(90));
    assert_eq!(info.track_duration_secs(), Some(300));

    let state = client.get_transport_info(0).unwrap();
    assert_eq!(state.state(), TransportState::Playing);

    position.assert();
    transport.assert();
}

#[test]
fn wrong_response_shape_is_reported() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", AVT_PATH)
        .with_status(200)
        .with_body(envelope(
            r#"<u:StopResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1"/>"#,
        ))
        .create();

    let client = AvTransportClient::new(server.url());
    let err = client.get_media_info(0).unwrap_err();
    assert!(matches!(
        err,
        ControlPointError::UnexpectedResponse {
            expected: "MediaInfo",
            found: "Empty",
            ..
        }
    ));
    mock.assert();
}

#[test]
fn seek_rel_time_formats_target() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", AVT_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("<Unit>REL_TIME</Unit>".into()),
            Matcher::Regex("<Target>00:02:05</Target>".into()),
        ]))
        .with_status(200)
        .with_body(envelope(
            r#"<u:SeekResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1"/>"#,
        ))
        .create();

    let client = AvTransportClient::new(server.url());
    client.seek_rel_time(0, 125).unwrap();
    mock.assert();
}

#[test]
fn quoted_action_header_and_custom_control_path() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/upnp/control/rendercontrol1")
        .match_header(
            "soapaction",
            "\"urn:schemas-upnp-org:service:RenderingControl:1#SetMute\"",
        )
        .match_body(Matcher::Regex("<DesiredMute>0</DesiredMute>".into()))
        .with_status(200)
        .with_body(envelope(
            r#"<u:SetMuteResponse xmlns:u="urn:schemas-upnp-org:service:RenderingControl:1"/>"#,
        ))
        .create();

    let soap = SoapClient::with_options(SoapClientOptions {
        quote_action_header: true,
        ..SoapClientOptions::default()
    });
    let client = RenderingControlClient::new(format!("{}/", server.url()))
        .with_control_path("/upnp/control/rendercontrol1")
        .with_soap_client(soap);

    client.set_mute(0, MASTER_CHANNEL, false).unwrap();
    mock.assert();
}

#[test]
fn unknown_elements_reach_the_injected_sink() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", AVT_PATH)
        .with_status(200)
        .with_body(envelope(
            r#"<x:Heartbeat xmlns:x="urn:vendor:hb"><Seq>9</Seq></x:Heartbeat>
<u:GetTransportInfoResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">
<CurrentTransportState>STOPPED</CurrentTransportState>
</u:GetTransportInfoResponse>"#,
        ))
        .create();

    let sink = Arc::new(CollectingDiagnostics::new());
    let soap = SoapClient::default().with_diagnostics(sink.clone());

    let body = soap
        .invoke(&server.url(), AVT_PATH, &GetTransportInfo::new(0))
        .unwrap();
    assert!(matches!(body, ResponseBody::Content(_)));
    assert_eq!(
        sink.take(),
        vec![Diagnostic::UnknownElement {
            namespace: Some("urn:vendor:hb".into()),
            name: "Heartbeat".into(),
        }]
    );
    mock.assert();
}

#[test]
fn free_send_uses_default_options() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", RC_PATH)
        .match_header(
            "soapaction",
            "urn:schemas-upnp-org:service:RenderingControl:1#GetVolume",
        )
        .with_status(200)
        .with_body(envelope(
            r#"<u:GetVolumeResponse xmlns:u="urn:schemas-upnp-org:service:RenderingControl:1"><CurrentVolume>8</CurrentVolume></u:GetVolumeResponse>"#,
        ))
        .create();

    let payload = pmosoap::payloads::GetVolume::new(0, MASTER_CHANNEL.into());
    let body = pmocontrol::send(&server.url(), RC_PATH, RENDERING_CONTROL, "GetVolume", &payload)
        .unwrap();
    let volume = body.into_content().unwrap().into_volume().unwrap();
    assert_eq!(volume.current_volume, 8);
    mock.assert();
}
