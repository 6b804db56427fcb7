use adminkit::config::{DisabledValidation, FormConfig};
use adminkit::form::{Field, FieldKind, FieldModel, Formatter, SelectOption, format_currency, format_phone};
use adminkit::model::{Record, Value};
use adminkit::validation::rules;

fn operators() -> Vec<SelectOption> {
    vec![
        SelectOption::new("EQ", "Equals"),
        SelectOption::new("GT", "Greater than"),
        SelectOption::new("LT", "Less than"),
    ]
}

fn scoring_rule_form() -> FieldModel<Record> {
    let exists = |r: &Record| r.get_str("parameterDataType") == Some("E");
    FieldModel::new(vec![
        Field::select("parameterDataType", "Parameter type")
            .required()
            .options([
                SelectOption::new("N", "Numeric"),
                SelectOption::new("E", "Exists"),
            ])
            .validate(rules::required_select("Parameter type")),
        Field::select("decisionOperator", "Operator")
            .required()
            .options_if(move |r: &Record| if exists(r) { Vec::new() } else { operators() })
            .disabled_if(exists),
        Field::text("decisionValue", "Decision value")
            .disabled_if(exists)
            .validate(
                rules::required("Decision value")
                    .and(rules::integer_range("Decision value", 0, 999))
                    .when(move |r: &Record| !exists(r)),
            ),
        Field::text("phone", "Phone")
            .format(Formatter::phone())
            .validate(rules::exact_digit_count("Phone", 10)),
        Field::currency("amount", "Amount")
            .on_blur(Formatter::currency_display())
            .on_focus(Formatter::currency_edit())
            .validate(rules::currency("Amount")),
    ])
    .unwrap()
}

#[test]
fn test_exists_type_disables_operator_and_exempts_value() {
    let model = scoring_rule_form();
    let draft = Record::new("1").set("parameterDataType", "E");

    let operator = model.resolve_field("decisionOperator", &draft).unwrap();
    assert!(operator.disabled);
    assert!(operator.options.is_empty());
    assert_eq!(model.validate_field("decisionValue", &draft), None);
}

#[test]
fn test_numeric_type_enables_operator_and_validates_value() {
    let model = scoring_rule_form();
    let draft = Record::new("1").set("parameterDataType", "N");

    let operator = model.resolve_field("decisionOperator", &draft).unwrap();
    assert!(!operator.disabled);
    assert_eq!(operator.options, operators());
    assert_eq!(
        model.validate_field("decisionValue", &draft).as_deref(),
        Some("Decision value is required")
    );
}

#[test]
fn test_resolve_keeps_declaration_order() {
    let model = scoring_rule_form();
    let resolved = model.resolve(&Record::new("1"));
    let keys: Vec<&str> = resolved.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["parameterDataType", "decisionOperator", "decisionValue", "phone", "amount"]
    );
    assert_eq!(resolved[4].kind, FieldKind::Currency);
    assert!(resolved[0].required);
}

#[test]
fn test_formatters_are_idempotent() {
    for input in ["3255550100", "(325)-555-0100", "32555", ""] {
        let once = format_phone(input);
        assert_eq!(format_phone(&once), once);
    }
    for input in ["1234.5", "1,234.50", "0", "abc", ""] {
        let once = format_currency(input);
        assert_eq!(format_currency(&once), once);
    }
    let phone = Formatter::phone();
    let once = phone.apply(&Value::from("325 555 0100"));
    assert_eq!(phone.apply(&once), once);
}

#[test]
fn test_form_wide_skip_policy() {
    let model = FieldModel::new(vec![
        Field::text("locked", "Locked")
            .disabled_if(|_: &Record| true)
            .validate(rules::required("Locked")),
    ])
    .unwrap();
    let draft = Record::new("1");
    assert!(model.validate_all(&draft).is_invalid());

    let model = model.with_config(FormConfig::new().with_disabled_validation(DisabledValidation::Skip));
    assert!(model.validate_all(&draft).is_valid());
}

#[test]
fn test_form_config_from_json() {
    let config = FormConfig::from_json(r#"{"disabled_validation": "skip"}"#).unwrap();
    assert_eq!(config.disabled_validation, DisabledValidation::Skip);
    assert_eq!(FormConfig::from_json("{}").unwrap(), FormConfig::default());
}
