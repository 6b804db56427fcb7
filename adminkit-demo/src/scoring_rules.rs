//! Scoring rules admin page: a rule grid plus the add/edit form.

use std::sync::Arc;

use adminkit::config::GridConfig;
use adminkit::error::{ConfigError, SessionError, TableError};
use adminkit::form::{EditingSession, Field, FieldModel, Formatter, SelectOption, SubmitOutcome};
use adminkit::model::{Record, Value};
use adminkit::table::{Column, ColumnModel, PinSide, TableState, pinned_layout};
use adminkit::validation::rules;
use tokio::sync::Mutex;

/// In-memory stand-in for the rules backend.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rows: Arc<Mutex<Vec<Record>>>,
}

impl RuleStore {
    pub fn new(rows: Vec<Record>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub async fn rows(&self) -> Vec<Record> {
        self.rows.lock().await.clone()
    }

    /// Insert or replace by id. Rule names are unique.
    pub async fn save(&self, record: Record) -> Result<(), String> {
        let mut rows = self.rows.lock().await;
        let name = record.get_str("ruleName");
        if rows.iter().any(|row| row.id() != record.id() && row.get_str("ruleName") == name) {
            return Err(format!("a rule named '{}' already exists", name.unwrap_or_default()));
        }
        match rows.iter_mut().find(|row| row.id() == record.id()) {
            Some(existing) => *existing = record,
            None => rows.push(record),
        }
        Ok(())
    }
}

fn is_exists_type(record: &Record) -> bool {
    record.get_str("parameterDataType") == Some("E")
}

fn operator_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("EQ", "Equals"),
        SelectOption::new("GT", "Greater than"),
        SelectOption::new("LT", "Less than"),
    ]
}

pub fn columns() -> Result<ColumnModel, ConfigError> {
    ColumnModel::new(vec![
        Column::new("ruleName", "Rule").sortable().width(180).pin(PinSide::Left),
        Column::new("parameterDataType", "Type").sortable().width(80),
        Column::new("decisionOperator", "Operator").width(100),
        Column::new("decisionValue", "Value").sortable().width(100),
        Column::new("points", "Points").sortable().width("90px"),
        Column::new("startDate", "Start").sortable().width(110).pin(PinSide::Right),
        Column::new("endDate", "End").sortable().width(110).pin(PinSide::Right),
    ])
}

pub fn fields() -> Result<FieldModel<Record>, ConfigError> {
    FieldModel::new(vec![
        Field::text("ruleName", "Rule name")
            .required()
            .group("Rule")
            .validate(rules::required("Rule name").and(rules::max_length("Rule name", 60))),
        Field::select("parameterDataType", "Parameter type")
            .required()
            .group("Rule")
            .default_value("N")
            .options([SelectOption::new("N", "Numeric"), SelectOption::new("E", "Exists")])
            .validate(rules::required_select("Parameter type")),
        Field::select("decisionOperator", "Operator")
            .group("Decision")
            .options_if(|r: &Record| if is_exists_type(r) { Vec::new() } else { operator_options() })
            .disabled_if(is_exists_type)
            .validate(rules::required_select("Operator").when(|r: &Record| !is_exists_type(r))),
        Field::text("decisionValue", "Decision value")
            .group("Decision")
            .disabled_if(is_exists_type)
            .validate(
                rules::required("Decision value")
                    .and(rules::integer_range("Decision value", 0, 999))
                    .when(|r: &Record| !is_exists_type(r)),
            ),
        Field::currency("points", "Points")
            .group("Decision")
            .on_blur(Formatter::currency_display())
            .on_focus(Formatter::currency_edit())
            .validate(rules::currency("Points")),
        Field::text("contactPhone", "Contact phone")
            .format(Formatter::phone())
            .validate(rules::exact_digit_count("Contact phone", 10)),
        Field::date("startDate", "Start date")
            .required()
            .validate(rules::required("Start date").and(rules::date("Start date"))),
        Field::date("endDate", "End date")
            .min_if(|r: &Record| r.get("startDate").cloned())
            .validate(rules::date("End date").and(rules::date_not_before("End date", "startDate", "Start date"))),
    ])
}

pub fn sample_rows() -> Vec<Record> {
    vec![
        Record::new("r-100")
            .set("ruleName", "Minimum bureau score")
            .set("parameterDataType", "N")
            .set("decisionOperator", "GT")
            .set("decisionValue", 620i64)
            .set("points", 25.5)
            .set("startDate", "2024-01-01"),
        Record::new("r-101")
            .set("ruleName", "Has bankruptcy")
            .set("parameterDataType", "E")
            .set("points", 0.00001)
            .set("startDate", "2024-02-15")
            .set("endDate", "2025-02-15"),
        Record::new("r-102")
            .set("ruleName", "Abilene branch bonus")
            .set("parameterDataType", "N")
            .set("decisionOperator", "EQ")
            .set("decisionValue", 1i64)
            .set("points", 10i64)
            .set("startDate", "2023-07-01"),
    ]
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Everything the page owns between renders.
pub struct ScoringRulesPage {
    grid: GridConfig,
    columns: ColumnModel,
    state: TableState,
    session: EditingSession<Record>,
    store: RuleStore,
}

impl ScoringRulesPage {
    pub fn new(grid: GridConfig, store: RuleStore) -> Result<Self, PageError> {
        let state = TableState::new(&grid);
        Ok(Self {
            columns: columns()?,
            session: EditingSession::new(fields()?),
            grid,
            state,
            store,
        })
    }

    pub fn state_mut(&mut self) -> &mut TableState {
        &mut self.state
    }

    pub fn columns(&self) -> &ColumnModel {
        &self.columns
    }

    pub fn session(&self) -> &EditingSession<Record> {
        &self.session
    }

    /// Render the current page of the grid as plain text.
    pub async fn render_grid(&mut self) -> String {
        let rows = self.store.rows().await;
        let view = self.state.view(&rows, &self.columns);
        let layout = pinned_layout(&self.columns, &self.state, &self.grid);

        let mut out = String::new();
        let header: Vec<String> = self
            .columns
            .iter()
            .map(|column| match layout.offset(&column.key) {
                Some((side, offset)) => format!("{} [{:?} {}px]", column.header, side, offset),
                None => column.header.clone(),
            })
            .collect();
        out.push_str(&header.join(" | "));
        out.push('\n');

        for row in &view.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|column| row.get(&column.key).map(Value::to_display_string).unwrap_or_default())
                .collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }
        out.push_str(&format!(
            "page {} of {} ({} rules)\n",
            view.page_index + 1,
            view.page_count().max(1),
            view.total
        ));
        out
    }

    /// Render the open form: one line per field with its state and error.
    pub fn render_form(&self) -> String {
        let Some(resolved) = self.session.resolved() else {
            return "(no rule open)\n".to_string();
        };
        let errors = self.session.errors();
        let mut out = String::new();
        for field in resolved {
            let marker = if field.required { "*" } else { "" };
            let state = if field.disabled { " (disabled)" } else { "" };
            out.push_str(&format!("{}{}{}: {}", field.label, marker, state, field.value));
            if !field.options.is_empty() {
                let values: Vec<&str> = field.options.iter().map(|o| o.value.as_str()).collect();
                out.push_str(&format!(" [{}]", values.join("/")));
            }
            if let Some(message) = errors.get(&field.key) {
                out.push_str(&format!("  <- {message}"));
            }
            out.push('\n');
        }
        out
    }

    pub fn add_rule(&self) -> Result<(), PageError> {
        Ok(self.session.open_for_add([])?)
    }

    pub async fn edit_rule(&self, id: &str) -> Result<bool, PageError> {
        let rows = self.store.rows().await;
        match rows.iter().find(|row| row.id() == id) {
            Some(row) => {
                self.session.open_for_edit(row)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn save(&self) -> Result<SubmitOutcome<Record>, PageError> {
        let store = self.store.clone();
        let outcome = self
            .session
            .submit(move |record| async move { store.save(record).await })
            .await?;
        Ok(outcome)
    }
}
