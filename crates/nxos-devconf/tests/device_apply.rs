//! Plans applied to an in-memory device through a session.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use nxos_devconf::{Banner, Dns, DnsProvider, IsisInterface, IsisProcess, Registry, VlanManager};
use nxos_devconf_test::{
    json_at, leaf_device, MemoryDevice, StalledDevice, UnreachableDevice,
};
use nxos_gnmi::{DeadlineAccessor, DeviceConf, GnmiError, Session, SetOperation};

fn dns() -> Dns {
    Dns {
        enable: true,
        domain: "sap.corp".to_string(),
        providers: ["mgmt0", "lo1"]
            .into_iter()
            .flat_map(|vrf| {
                ["147.204.8.200", "147.204.8.201"]
                    .into_iter()
                    .map(move |address| DnsProvider {
                        address: address.to_string(),
                        vrf: vrf.to_string(),
                        source_interface: None,
                    })
            })
            .collect(),
    }
}

#[tokio::test]
async fn test_dns_applied_to_device() {
    let session = Session::new("leaf1", leaf_device());
    let updates = dns().to_updates(&session).await.unwrap();
    let report = session.apply(&updates).await.unwrap();
    assert_eq!(report.applied, 1);

    let tree = session.transport().read("System/dns-items").unwrap();
    let profile = json_at(&tree, "prof-items/Prof-list[name=default]").unwrap();
    assert_eq!(profile["dom-items"]["name"], json!("sap.corp"));
    for vrf in ["mgmt0", "lo1"] {
        for addr in ["147.204.8.200", "147.204.8.201"] {
            let path = format!(
                "vrf-items/Vrf-list[name={}]/prov-items/Provider-list[addr={}]",
                vrf, addr
            );
            assert!(json_at(profile, &path).is_some(), "missing {}", path);
        }
    }
}

#[tokio::test]
async fn test_reset_then_apply_matches_fresh_apply() {
    let fresh = Session::new("fresh", MemoryDevice::new());
    let reused = Session::new("reused", MemoryDevice::new());

    let domains: Vec<Box<dyn DeviceConf>> = vec![
        Box::new(dns()),
        Box::new(Banner::new("^", "Authorized access only")),
        Box::new(VlanManager { long_name: true }),
    ];

    for conf in &domains {
        // Leave residue on the reused device first
        let stale = conf.to_updates(&reused).await.unwrap();
        reused.apply(&stale).await.unwrap();
        let reset = conf.reset(&reused).await.unwrap();
        reused.apply(&reset).await.unwrap();

        let plan = conf.to_updates(&reused).await.unwrap();
        assert_eq!(plan, conf.to_updates(&fresh).await.unwrap());
        reused.apply(&plan).await.unwrap();
        fresh.apply(&plan).await.unwrap();
    }

    assert_eq!(
        reused.transport().snapshot(),
        fresh.transport().snapshot()
    );
}

#[tokio::test]
async fn test_dns_reset_then_disable() {
    let session = Session::new("leaf1", MemoryDevice::new());
    session
        .apply(&dns().to_updates(&session).await.unwrap())
        .await
        .unwrap();

    let disabled = Dns {
        enable: false,
        ..dns()
    };
    session
        .apply(&disabled.reset(&session).await.unwrap())
        .await
        .unwrap();
    session
        .apply(&disabled.to_updates(&session).await.unwrap())
        .await
        .unwrap();

    assert_eq!(
        session.transport().read("System/dns-items"),
        Some(json!({"adminSt": "disabled"}))
    );
}

#[tokio::test]
async fn test_isis_binding_requires_interface() {
    let session = Session::new("leaf1", leaf_device());
    let binding = IsisInterface::new("Ethernet1/9", "UNDERLAY");

    let err = binding.to_updates(&session).await.unwrap_err();
    assert!(matches!(err, GnmiError::InterfaceNotFound { ref interface, .. } if interface == "eth1/9"));
    assert!(err.is_retryable());
    assert!(session.transport().sent().is_empty());
}

#[tokio::test]
async fn test_isis_rows_replaced_on_reapply() {
    let session = Session::new("leaf1", leaf_device());
    let row = "System/isis-items/if-items/InternalIf-list[id=eth1/1]";

    let p2p = IsisInterface {
        point_to_point: true,
        ipv6: Some(false),
        ..IsisInterface::new("Ethernet1/1", "UNDERLAY")
    };
    session
        .apply(&p2p.to_updates(&session).await.unwrap())
        .await
        .unwrap();

    let plain = IsisInterface::new("Ethernet1/1", "UNDERLAY");
    session
        .apply(&plain.to_updates(&session).await.unwrap())
        .await
        .unwrap();
    assert_eq!(
        session.transport().read(row),
        Some(json!({
            "id": "eth1/1",
            "instance": "UNDERLAY",
            "dom": "default",
            "v4enable": true,
            "v6enable": true,
            "networkTypeP2P": "disabled"
        }))
    );
    assert_eq!(
        session.transport().read("System/fm-items/isis-items"),
        Some(json!({"adminSt": "enabled"}))
    );

    session
        .apply(&plain.reset(&session).await.unwrap())
        .await
        .unwrap();
    assert_eq!(session.transport().read(row), None);
}

#[tokio::test]
async fn test_ordered_apply_stops_at_rejection() {
    let device = Arc::new(MemoryDevice::rejecting(
        "System/isis-items/inst-items/Inst-list[name=UNDERLAY]",
    ));
    let session = Session::new("leaf1", Arc::clone(&device));

    let updates = IsisProcess::new("UNDERLAY", "49.0001.0000.0000.0001.00")
        .to_updates(&*device)
        .await
        .unwrap();
    assert!(session.apply(&updates).await.is_err());

    let sent = device.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(&sent[0], SetOperation::Update { path, .. } if path == "System/fm-items/isis-items"));
}

#[tokio::test]
async fn test_accessor_errors_propagate() {
    let err = IsisInterface::new("Ethernet1/1", "UNDERLAY")
        .to_updates(&UnreachableDevice)
        .await
        .unwrap_err();
    assert!(matches!(err, GnmiError::Accessor { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_accessor_deadline() {
    let accessor = DeadlineAccessor::new(StalledDevice::default(), Duration::from_secs(10));
    let err = IsisInterface::new("Ethernet1/1", "UNDERLAY")
        .to_updates(&accessor)
        .await
        .unwrap_err();
    assert!(matches!(err, GnmiError::Timeout { .. }));
}

#[tokio::test]
async fn test_baseline_applies_cleanly() {
    let session = Session::new("leaf1", leaf_device());
    let updates = Registry::baseline().to_updates(&session).await.unwrap();
    let report = session.apply(&updates).await.unwrap();
    assert_eq!(report.applied, updates.len());

    let tree = session.transport().snapshot();
    assert_eq!(
        json_at(&tree, "System/userext-items/preloginbanner-items/message"),
        Some(&json!("User Access Verification"))
    );
    assert_eq!(
        json_at(&tree, "System/nxapi-items/useVrf"),
        Some(&json!("management"))
    );
}
