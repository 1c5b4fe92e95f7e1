//! Réponses de renderers réels, décodées via l'API publique

use pmosoap::payloads::{GetPositionInfo, PositionInfoResponse};
use pmosoap::{
    ActionRequest, CollectingDiagnostics, Diagnostic, ResponseBody, ResponseContent,
    decode_request_payload, decode_response, error_codes,
};

const POSITION_INFO: &str = r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
<s:Body>
<u:GetPositionInfoResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">
<Track>1</Track>
<TrackDuration>0:03:12.000</TrackDuration>
<TrackMetaData>&lt;DIDL-Lite xmlns=&quot;urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/&quot;&gt;&lt;item id=&quot;42&quot;&gt;&lt;dc:title&gt;Song&lt;/dc:title&gt;&lt;/item&gt;&lt;/DIDL-Lite&gt;</TrackMetaData>
<TrackURI>http://192.168.0.12:8080/audio/42.flac</TrackURI>
<RelTime>0:00:47.120</RelTime>
<AbsTime>NOT_IMPLEMENTED</AbsTime>
<RelCount>2147483647</RelCount>
<AbsCount>2147483647</AbsCount>
</u:GetPositionInfoResponse>
<e:VendorStatus xmlns:e="urn:vendor-com:status-1"><Link quality="good"><Rssi>-51</Rssi></Link></e:VendorStatus>
</s:Body>
</s:Envelope>"#;

const TRANSITION_FAULT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
  <s:Body>
    <s:Fault>
      <faultcode>s:Client</faultcode>
      <faultstring>UPnPError</faultstring>
      <detail>
        <UPnPError xmlns="urn:schemas-upnp-org:control-1-0">
          <errorCode>701</errorCode>
        </UPnPError>
      </detail>
    </s:Fault>
  </s:Body>
</s:Envelope>"#;

#[test]
fn position_info_with_vendor_extension() {
    let sink = CollectingDiagnostics::new();
    let body = decode_response(POSITION_INFO.as_bytes(), &sink).unwrap();

    let info: PositionInfoResponse = match body {
        ResponseBody::Content(ResponseContent::PositionInfo(info)) => info,
        other => panic!("unexpected body: {other:?}"),
    };
    assert_eq!(info.track, 1);
    assert_eq!(info.rel_time_secs(), Some(47));
    assert_eq!(info.track_duration_secs(), Some(192));
    assert!(info.track_meta_data.contains(r#"<item id="42">"#));

    assert_eq!(
        sink.take(),
        vec![Diagnostic::UnknownElement {
            namespace: Some("urn:vendor-com:status-1".into()),
            name: "VendorStatus".into(),
        }]
    );
}

#[test]
fn fault_exposes_upnp_error_code() {
    let sink = CollectingDiagnostics::new();
    let body = decode_response(TRANSITION_FAULT.as_bytes(), &sink).unwrap();

    let fault = body.fault().expect("fault expected");
    let upnp = fault.upnp_error().expect("UPnPError detail expected");
    assert_eq!(upnp.error_code, error_codes::TRANSITION_NOT_AVAILABLE);
    assert_eq!(
        fault.to_string(),
        "s:Client: UPnPError (UPnP error 701: Transition not available)"
    );
    assert!(sink.is_empty());
}

#[test]
fn request_envelope_decodes_back() {
    let request = ActionRequest::for_action(GetPositionInfo::new(0));
    let xml = request.envelope().to_xml().unwrap();

    let payload: GetPositionInfo = decode_request_payload(&xml).unwrap();
    assert_eq!(payload, request.payload);
}
