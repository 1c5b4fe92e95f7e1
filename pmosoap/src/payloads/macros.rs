//! Déclaration des requêtes d'action UPnP
//!
//! Chaque requête est un élément préfixé `u:` portant sa propre déclaration
//! `xmlns:u`, comme l'attendent les renderers :
//!
//! ```xml
//! <u:GetVolume xmlns:u="urn:schemas-upnp-org:service:RenderingControl:1">
//!   <InstanceID>0</InstanceID>
//!   <Channel>Master</Channel>
//! </u:GetVolume>
//! ```

/// Génère la structure d'une requête, son constructeur et son impl de
/// [`UpnpAction`](crate::UpnpAction).
///
/// Les arguments sont sérialisés dans l'ordre de déclaration, ce que
/// certains équipements exigent.
macro_rules! upnp_request {
    (
        $(#[$meta:meta])*
        $name:ident ($service:expr, $action:literal, $element:literal) {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $ty:ty => $xml:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(rename = $element)]
        pub struct $name {
            /// URN du service, émis en `xmlns:u`
            #[serde(rename = "@xmlns:u")]
            pub xmlns: String,
            $(
                $(#[$field_meta])*
                #[serde(rename = $xml)]
                pub $field: $ty,
            )*
        }

        impl $name {
            pub fn new($($field: $ty),*) -> Self {
                Self {
                    xmlns: $service.to_string(),
                    $($field),*
                }
            }
        }

        impl $crate::UpnpAction for $name {
            const SERVICE: &'static str = $service;
            const ACTION: &'static str = $action;
        }
    };
}
