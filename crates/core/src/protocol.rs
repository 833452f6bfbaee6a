//! Wire types for the host-boundary messages.
//!
//! The core talks to its host (launcher, capture service, injection
//! orchestrator) through small JSON messages. The shapes here are the
//! contract; the transport is the host's business.

use crate::error::{Result, SnipError};
use serde::{Deserialize, Serialize};

/// Messages addressed to or through the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    /// Starts a snip session. When `autoCopyOnMouseup` is omitted the core
    /// reads the persisted preference instead.
    #[serde(rename = "START_SNIP")]
    StartSnip {
        #[serde(
            rename = "autoCopyOnMouseup",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        auto_copy_on_mouseup: Option<bool>,
    },

    /// Requests a full-viewport raster from the capture service.
    #[serde(rename = "CAPTURE_VISIBLE")]
    CaptureVisible,

    /// Readiness probe the orchestrator sends before starting a session.
    /// The core never issues or answers this itself.
    #[serde(rename = "ENSURE_CONTENT")]
    EnsureContent {
        #[serde(rename = "tabId")]
        tab_id: u32,
    },
}

/// Response to [`HostMessage::CaptureVisible`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureResponse {
    pub ok: bool,
    #[serde(rename = "dataUrl", default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaptureResponse {
    pub fn success(data_url: impl Into<String>) -> Self {
        Self {
            ok: true,
            data_url: Some(data_url.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data_url: None,
            error: Some(error.into()),
        }
    }

    /// Converts the wire shape into the pipeline's result type.
    pub fn into_result(self) -> Result<String> {
        if self.ok {
            self.data_url
                .ok_or_else(|| SnipError::capture("response carried no data URL"))
        } else {
            Err(SnipError::capture(
                self.error.unwrap_or_else(|| "unknown".to_string()),
            ))
        }
    }
}

/// Response to [`HostMessage::EnsureContent`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnsureContentResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_snip_wire_shape() {
        let msg = HostMessage::StartSnip {
            auto_copy_on_mouseup: Some(false),
        };
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"type":"START_SNIP","autoCopyOnMouseup":false}"#
        );

        // Flag omitted entirely when unset
        let msg = HostMessage::StartSnip {
            auto_copy_on_mouseup: None,
        };
        assert_eq!(serde_json::to_string(&msg).unwrap(), r#"{"type":"START_SNIP"}"#);

        let parsed: HostMessage = serde_json::from_str(r#"{"type":"START_SNIP"}"#).unwrap();
        assert_eq!(
            parsed,
            HostMessage::StartSnip {
                auto_copy_on_mouseup: None
            }
        );
    }

    #[test]
    fn capture_visible_wire_shape() {
        assert_eq!(
            serde_json::to_string(&HostMessage::CaptureVisible).unwrap(),
            r#"{"type":"CAPTURE_VISIBLE"}"#
        );
    }

    #[test]
    fn ensure_content_wire_shape() {
        let msg = HostMessage::EnsureContent { tab_id: 42 };
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"type":"ENSURE_CONTENT","tabId":42}"#
        );
        let resp: EnsureContentResponse = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert!(resp.ok);
    }

    #[test]
    fn capture_response_maps_to_result() {
        let ok = CaptureResponse::success("data:image/png;base64,AAAA");
        assert_eq!(
            serde_json::to_string(&ok).unwrap(),
            r#"{"ok":true,"dataUrl":"data:image/png;base64,AAAA"}"#
        );
        assert_eq!(
            ok.into_result().unwrap(),
            "data:image/png;base64,AAAA".to_string()
        );

        let err = CaptureResponse::failure("tab not capturable");
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"ok":false,"error":"tab not capturable"}"#
        );
        assert!(matches!(
            err.into_result(),
            Err(crate::error::SnipError::Capture(_))
        ));
    }
}
