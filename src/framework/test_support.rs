//! Minimal entity used by the framework's own unit tests.

use async_trait::async_trait;

use crate::framework::{LedgerEntity, ResourceRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub name: String,
}

impl Widget {
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

#[derive(Debug)]
pub struct WidgetCreate {
    pub name: String,
    pub quantity: u64,
}

#[derive(Debug)]
pub struct WidgetRename(pub String);

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WidgetError {
    #[error("widget name must not be empty")]
    EmptyName,
    #[error("widget {0} is pinned")]
    Pinned(String),
}

#[async_trait]
impl LedgerEntity for Widget {
    type Id = u32;
    type Create = WidgetCreate;
    type Update = WidgetRename;
    type Context = ();
    type Error = WidgetError;

    const KIND: &'static str = "widget";

    fn from_create_params(_id: u32, params: WidgetCreate) -> Result<(Self, u64), WidgetError> {
        if params.name.is_empty() {
            return Err(WidgetError::EmptyName);
        }
        Ok((Self { name: params.name }, params.quantity))
    }

    fn apply_update(&mut self, update: &WidgetRename) -> Result<(), WidgetError> {
        if update.0.is_empty() {
            return Err(WidgetError::EmptyName);
        }
        self.name = update.0.clone();
        Ok(())
    }

    async fn on_delete(&self, _quantity: u64, _ctx: &()) -> Result<(), WidgetError> {
        if self.name == "pinned" {
            return Err(WidgetError::Pinned(self.name.clone()));
        }
        Ok(())
    }
}

/// Shorthand for a fresh widget record at version 1.
pub fn widget(id: u32, quantity: u64, name: &str) -> ResourceRecord<Widget> {
    ResourceRecord::new(id, quantity, Widget::named(name))
}
