//! Client Errors
//!
//! Every failure is local to the user action that triggered it.

use std::fmt;

/// Form field a validation error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    ItemText,
}

/// The user-facing action a request was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LoadLists,
    LoadList,
    CreateList,
    UpdateList,
    DeleteList,
    AddItem,
    UpdateItem,
    DeleteItem,
}

impl Action {
    pub fn failure_text(&self) -> &'static str {
        match self {
            Action::LoadLists => "Error cargando listas",
            Action::LoadList => "Error cargando la lista",
            Action::CreateList => "No se pudo crear la lista",
            Action::UpdateList => "No se pudo guardar",
            Action::DeleteList => "No se pudo eliminar",
            Action::AddItem => "No se pudo agregar",
            Action::UpdateItem => "No se pudo actualizar",
            Action::DeleteItem => "No se pudo eliminar el ítem",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_text())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// Rejected locally, no request was sent.
    #[error("{message}")]
    Validation { field: Field, message: &'static str },

    /// Non-2xx response, or the request never completed (`status` is `None`).
    #[error("{action} ({})", status_text(.status))]
    RequestFailed {
        action: Action,
        status: Option<u16>,
        detail: Option<String>,
    },

    /// 2xx response whose body did not have the expected shape.
    #[error("{action}: respuesta inválida ({message})")]
    Decode { action: Action, message: String },

    #[error("No hay ninguna lista seleccionada")]
    NoSelection,
}

fn status_text(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "sin conexión".to_string(),
    }
}

impl ClientError {
    /// Validation errors render next to the form field, everything else as a toast.
    pub fn is_inline(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }
}
