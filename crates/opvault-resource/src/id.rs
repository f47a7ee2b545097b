// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composite identifier codec: remote UUID <-> `vaults/<uuid>`.

/// Namespace segment of a vault's composite id.
pub const VAULT_ID_PREFIX: &str = "vaults";

/// Build the orchestrator-visible id for a remote vault UUID.
pub fn compose(uuid: &str) -> String {
    format!("{VAULT_ID_PREFIX}/{uuid}")
}

/// Recover the remote UUID from a composite id.
///
/// Anything other than exactly two `/`-separated segments yields `""`. The
/// first segment is not checked against [`VAULT_ID_PREFIX`].
pub fn decompose(composite: &str) -> String {
    let mut segments = composite.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(uuid), None) => uuid.to_string(),
        _ => String::new(),
    }
}
