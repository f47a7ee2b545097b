// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestrator-facing vocabulary: attribute values, diagnostics, schemas,
//! state objects and the resource lifecycle trait.

pub mod diagnostics;
pub mod resource;
pub mod schema;
pub mod state;
pub mod value;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use resource::{
    ConfigureRequest, ConfigureResponse, CreateRequest, CreateResponse, DeleteRequest,
    DeleteResponse, ImportStateRequest, ImportStateResponse, MetadataRequest, MetadataResponse,
    ProviderData, ReadRequest, ReadResponse, Resource, ResourceWithImportState, UpdateRequest,
    UpdateResponse, cancellable,
};
pub use schema::{PlanModifier, Schema, StringAttribute};
pub use state::{State, StateModel};
pub use value::AttrValue;
