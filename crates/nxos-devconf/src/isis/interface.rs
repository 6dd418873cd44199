use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use nxos_gnmi::{
    interface_exists, DeviceAccessor, DeviceConf, GnmiError, GnmiResult, Schema, Update,
};
use nxos_types::Interface;

use super::DOMAIN;
use crate::feature;
use crate::model::fm;
use crate::model::isis::{if_path, InternalIf};
use crate::model::AdminSt;

/// Attachment of one routed interface to an IS-IS instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsisInterface {
    pub interface: String,
    pub instance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vrf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<bool>,
    #[serde(default)]
    pub point_to_point: bool,
}

impl IsisInterface {
    pub fn new(interface: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            instance: instance.into(),
            vrf: None,
            ipv4: None,
            ipv6: None,
            point_to_point: false,
        }
    }

    /// Normalizes the interface name; only physical and loopback ports
    /// can be bound.
    fn normalized(&self) -> GnmiResult<Interface> {
        let intf: Interface = self
            .interface
            .parse()
            .map_err(|e: nxos_types::ParseError| {
                GnmiError::invalid_config(DOMAIN, "interface", e.to_string())
            })?;
        if !intf.is_routable_port() {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "interface",
                format!("{} is not a physical or loopback interface", intf),
            ));
        }
        Ok(intf)
    }

    fn build(&self, intf: &Interface) -> InternalIf {
        let mut row = InternalIf {
            id: intf.name().to_string(),
            instance: Some(self.instance.clone()),
            dom: self.vrf.clone(),
            v4_enable: self.ipv4,
            v6_enable: self.ipv6,
            network_type_p2p: self.point_to_point.then_some(AdminSt::Enabled),
        };
        Schema::populate_defaults(&mut row);
        row
    }
}

#[async_trait]
impl DeviceConf for IsisInterface {
    fn domain(&self) -> &'static str {
        DOMAIN
    }

    #[instrument(skip_all, fields(interface = %self.interface, instance = %self.instance))]
    async fn to_updates(&self, client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        let intf = self.normalized()?;
        if self.instance.is_empty() {
            return Err(GnmiError::invalid_config(
                DOMAIN,
                "instance",
                "must not be empty",
            ));
        }

        if !interface_exists(client, &intf).await? {
            warn!(interface = %intf, "Refusing to bind IS-IS to a missing interface");
            return Err(GnmiError::interface_not_found(DOMAIN, intf.name()));
        }

        debug!(interface = %intf, "Building IS-IS interface binding");
        Ok(vec![
            feature::enable(fm::ISIS_PATH),
            Update::replace(if_path(intf.name()), self.build(&intf)),
        ])
    }

    async fn reset(&self, _client: &dyn DeviceAccessor) -> GnmiResult<Vec<Update>> {
        let intf = self.normalized()?;
        Ok(vec![Update::delete(if_path(intf.name()))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nxos_devconf_test::{assert_kinds, MemoryDevice};
    use nxos_gnmi::UpdateKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_binding_defaults() {
        let device = MemoryDevice::with_interfaces(&["eth1/1"]);
        let updates = IsisInterface::new("Ethernet1/1", "UNDERLAY")
            .to_updates(&device)
            .await
            .unwrap();

        assert_kinds(&updates, &[UpdateKind::Editing, UpdateKind::Replacing]);
        assert_eq!(updates[0].path(), fm::ISIS_PATH);
        assert_eq!(
            updates[1].path(),
            "System/isis-items/if-items/InternalIf-list[id=eth1/1]"
        );
        assert_eq!(
            updates[1].value().unwrap().to_json().unwrap(),
            json!({
                "id": "eth1/1",
                "instance": "UNDERLAY",
                "dom": "default",
                "v4enable": true,
                "v6enable": true,
                "networkTypeP2P": "disabled"
            })
        );
    }

    #[tokio::test]
    async fn test_point_to_point_and_families() {
        let device = MemoryDevice::with_interfaces(&["lo0"]);
        let binding = IsisInterface {
            ipv6: Some(false),
            point_to_point: true,
            vrf: Some("blue".to_string()),
            ..IsisInterface::new("loopback0", "UNDERLAY")
        };
        let updates = binding.to_updates(&device).await.unwrap();
        let value = updates[1].value().unwrap().to_json().unwrap();
        assert_eq!(value["dom"], json!("blue"));
        assert_eq!(value["v6enable"], json!(false));
        assert_eq!(value["networkTypeP2P"], json!("enabled"));
    }

    #[tokio::test]
    async fn test_missing_interface_is_precondition_error() {
        let device = MemoryDevice::with_interfaces(&["eth1/1"]);
        let err = IsisInterface::new("eth1/2", "UNDERLAY")
            .to_updates(&device)
            .await
            .unwrap_err();
        assert!(matches!(err, GnmiError::InterfaceNotFound { .. }));
        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn test_rejects_non_routable_interface() {
        let device = MemoryDevice::with_interfaces(&["vlan10"]);
        let err = IsisInterface::new("Vlan10", "UNDERLAY")
            .to_updates(&device)
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = IsisInterface::new("eth1/1", "")
            .to_updates(&MemoryDevice::with_interfaces(&["eth1/1"]))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_reset_deletes_row() {
        let updates = IsisInterface::new("Ethernet1/1", "UNDERLAY")
            .reset(&MemoryDevice::new())
            .await
            .unwrap();
        assert_kinds(&updates, &[UpdateKind::Deleting]);
        assert_eq!(
            updates[0].path(),
            "System/isis-items/if-items/InternalIf-list[id=eth1/1]"
        );
    }
}
