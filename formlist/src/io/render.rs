//! Text render surface for form snapshots.

use anyhow::Result;
use minijinja::{Environment, context};
use serde::Serialize;

use crate::core::types::ErrorEntry;
use crate::form::FormSnapshot;

const FORM_TEMPLATE: &str = include_str!("templates/form.txt");

/// One displayed row: the record, its slot index and its messages.
#[derive(Debug, Clone, Serialize)]
struct RowView<'a> {
    index: usize,
    name: &'a str,
    age: &'a str,
    errors: &'a ErrorEntry,
}

/// Template engine wrapper around minijinja.
pub struct FormRenderer {
    env: Environment<'static>,
    show_revision: bool,
}

impl FormRenderer {
    pub fn new(show_revision: bool) -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("form.txt", FORM_TEMPLATE)
            .expect("form template should be valid");
        Self { env, show_revision }
    }

    pub fn render(&self, snapshot: &FormSnapshot) -> Result<String> {
        let rows: Vec<RowView<'_>> = snapshot
            .records
            .iter()
            .zip(&snapshot.errors)
            .enumerate()
            .map(|(index, (record, errors))| RowView {
                index,
                name: &record.name,
                age: &record.age,
                errors,
            })
            .collect();
        let template = self.env.get_template("form.txt")?;
        let rendered = template.render(context! {
            show_revision => self.show_revision,
            revision => snapshot.revision,
            rows => &rows,
            outcome => &snapshot.last_outcome,
        })?;
        Ok(rendered)
    }
}
