//! Feature manager updates.
//!
//! A feature must be enabled before its body is configured: the device
//! rejects or drops configuration under a disabled feature. Two-step
//! translators therefore always emit [`enable`] first.

use nxos_gnmi::Update;

use crate::model::fm::FeatureItems;
use crate::model::AdminSt;

/// Editing update that enables the feature at `path`.
pub fn enable(path: &str) -> Update {
    set_admin_st(path, AdminSt::Enabled)
}

/// Editing update that disables the feature at `path`. This is the whole
/// plan of a disabled domain.
pub fn disable(path: &str) -> Update {
    set_admin_st(path, AdminSt::Disabled)
}

fn set_admin_st(path: &str, admin_st: AdminSt) -> Update {
    Update::edit(
        path,
        FeatureItems {
            admin_st: Some(admin_st),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fm;
    use nxos_gnmi::UpdateKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_enable_and_disable() {
        let update = enable(fm::ISIS_PATH);
        assert_eq!(update.kind(), UpdateKind::Editing);
        assert_eq!(update.path(), "System/fm-items/isis-items");
        assert_eq!(
            update.value().unwrap().to_json().unwrap(),
            json!({"adminSt": "enabled"})
        );

        let update = disable(fm::GRPC_PATH);
        assert_eq!(
            update.value().unwrap().to_json().unwrap(),
            json!({"adminSt": "disabled"})
        );
    }
}
