//! Extension pour intégrer la configuration SOAP dans pmoconfig
//!
//! Ce module fournit le trait `ControlConfigExt` qui ajoute à
//! `pmoconfig::Config` les réglages du client de contrôle (clés `soap.*`).

use anyhow::Result;
use pmoconfig::Config;
use serde_yaml::Value;

use crate::soap_client::DEFAULT_USER_AGENT;

pub const DEFAULT_RENDERING_CONTROL_PATH: &str = "MediaRenderer/RenderingControl/Control";
pub const DEFAULT_AVTRANSPORT_PATH: &str = "MediaRenderer/AVTransport/Control";

/// Trait d'extension pour ajouter la configuration SOAP à pmoconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use pmoconfig::get_config;
/// use pmocontrol::ControlConfigExt;
///
/// let config = get_config();
/// let path = config.get_avtransport_control_path()?;
/// ```
pub trait ControlConfigExt {
    /// User-Agent envoyé avec chaque requête (défaut: "PMOSoap/0.1 UPnP/1.0")
    fn get_soap_user_agent(&self) -> Result<String>;

    fn set_soap_user_agent(&self, user_agent: String) -> Result<()>;

    /// Faut-il entourer `soapaction` de guillemets ? (défaut: non)
    fn get_soap_quote_action_header(&self) -> bool;

    fn set_soap_quote_action_header(&self, quote: bool) -> Result<()>;

    /// Chemin de contrôle RenderingControl relatif à l'URL du device
    fn get_rendering_control_path(&self) -> Result<String>;

    fn set_rendering_control_path(&self, path: String) -> Result<()>;

    /// Chemin de contrôle AVTransport relatif à l'URL du device
    fn get_avtransport_control_path(&self) -> Result<String>;

    fn set_avtransport_control_path(&self, path: String) -> Result<()>;
}

impl ControlConfigExt for Config {
    fn get_soap_user_agent(&self) -> Result<String> {
        match self.get_value(&["soap", "user_agent"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_USER_AGENT.to_string()),
        }
    }

    fn set_soap_user_agent(&self, user_agent: String) -> Result<()> {
        self.set_value(&["soap", "user_agent"], Value::String(user_agent))
    }

    fn get_soap_quote_action_header(&self) -> bool {
        self.get_bool_or(&["soap", "quote_action_header"], false)
    }

    fn set_soap_quote_action_header(&self, quote: bool) -> Result<()> {
        self.set_value(&["soap", "quote_action_header"], Value::Bool(quote))
    }

    fn get_rendering_control_path(&self) -> Result<String> {
        Ok(self.get_string_or(
            &["soap", "control_paths", "rendering_control"],
            DEFAULT_RENDERING_CONTROL_PATH,
        ))
    }

    fn set_rendering_control_path(&self, path: String) -> Result<()> {
        self.set_value(
            &["soap", "control_paths", "rendering_control"],
            Value::String(path),
        )
    }

    fn get_avtransport_control_path(&self) -> Result<String> {
        Ok(self.get_string_or(
            &["soap", "control_paths", "avtransport"],
            DEFAULT_AVTRANSPORT_PATH,
        ))
    }

    fn set_avtransport_control_path(&self, path: String) -> Result<()> {
        self.set_value(&["soap", "control_paths", "avtransport"], Value::String(path))
    }
}
