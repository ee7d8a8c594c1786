//! The editing working set behind the item form: hydration, per-kind input
//! coercion, one-shot fallback rehydration, and full-overwrite serialization.

use serde_json::{Map, Number, Value};

use crate::form::reconcile::{reconcile, ReconciledField, Reconciliation};
use crate::model::{EndpointField, FieldKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// A live form for one item under one endpoint schema.
#[derive(Debug, Clone)]
pub struct ItemForm {
    mode: FormMode,
    schema: Vec<EndpointField>,
    state: Reconciliation,
    rehydrated: bool,
}

impl ItemForm {
    pub fn new(mode: FormMode, campos: &[EndpointField], stored: Option<&Value>) -> Self {
        Self {
            mode,
            schema: campos.to_vec(),
            state: reconcile(campos, stored),
            rehydrated: false,
        }
    }

    pub fn fields(&self) -> &[ReconciledField] {
        &self.state.fields
    }

    pub fn value(&self, title: &str) -> Option<&Value> {
        self.state
            .fields
            .iter()
            .find(|f| f.title == title)
            .map(|f| &f.value)
    }

    /// Whether the caller should re-fetch the item and call [`rehydrate`].
    /// Fires at most once per form instance, and only when an edit-mode
    /// hydration matched nothing — the guard is what keeps a consistently
    /// empty upstream from turning into a request loop.
    ///
    /// [`rehydrate`]: ItemForm::rehydrate
    pub fn needs_rehydration(&mut self) -> bool {
        if self.mode != FormMode::Edit || self.state.matched > 0 || self.rehydrated {
            return false;
        }
        self.rehydrated = true;
        true
    }

    /// Re-run reconciliation against a freshly fetched item payload.
    pub fn rehydrate(&mut self, fresh: &Value) {
        self.state = reconcile(&self.schema, Some(fresh));
    }

    /// Apply a raw input change to a field. Unknown titles are ignored.
    ///
    /// Strings are stored verbatim (`mult` only selects the widget). Numbers
    /// keep an empty input as `""`; anything else is parsed as floating
    /// point, and text that does not parse stays verbatim — there is no
    /// rejection here, the numeric input widget is the only guard. Image
    /// values are data-URI strings, replaced wholesale.
    pub fn set_input(&mut self, title: &str, raw: &str) {
        let Some(field) = self.state.fields.iter_mut().find(|f| f.title == title) else {
            return;
        };
        field.value = match field.kind {
            FieldKind::String | FieldKind::Image => Value::String(raw.to_string()),
            FieldKind::Number => coerce_number(raw),
        };
    }

    /// Replace an image field's data URI, or remove it entirely. Replacing
    /// discards the prior value; there is no diffing or versioning.
    pub fn set_image(&mut self, title: &str, data_uri: Option<&str>) {
        self.set_input(title, data_uri.unwrap_or(""));
    }

    /// Serialize the whole working set as the submission payload. Partial
    /// updates are not supported: every submit overwrites every field the
    /// schema defines.
    pub fn values(&self) -> Map<String, Value> {
        self.state.values()
    }
}

fn coerce_number(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    match raw.trim().parse::<f64>().ok().and_then(Number::from_f64) {
        Some(number) => Value::Number(number),
        None => Value::String(raw.to_string()),
    }
}
