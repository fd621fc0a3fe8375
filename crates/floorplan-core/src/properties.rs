//! Manual edits from the properties panel.
//!
//! The host hands over raw text per field. Numbers are parsed leniently
//! (blank or garbage reads as zero) and then clamped into range, so a
//! half-typed value can never break an element's invariants.

use crate::element::{ElementKind, MIN_SIZE};
use crate::plan::{ElementUpdate, FloorPlan};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An editable field of the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyField {
    X,
    Y,
    Width,
    Height,
    Rotation,
    Name,
    Number,
    Seats,
    Thickness,
}

impl PropertyField {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyField::X => "x",
            PropertyField::Y => "y",
            PropertyField::Width => "width",
            PropertyField::Height => "height",
            PropertyField::Rotation => "rotation",
            PropertyField::Name => "name",
            PropertyField::Number => "number",
            PropertyField::Seats => "seats",
            PropertyField::Thickness => "thickness",
        }
    }

    /// Whether elements of this kind expose the field.
    pub fn applies_to(self, kind: &ElementKind) -> bool {
        match self {
            PropertyField::X
            | PropertyField::Y
            | PropertyField::Width
            | PropertyField::Height
            | PropertyField::Rotation => true,
            PropertyField::Name => !matches!(kind, ElementKind::Table { .. }),
            PropertyField::Number | PropertyField::Seats => matches!(kind, ElementKind::Table { .. }),
            PropertyField::Thickness => matches!(kind, ElementKind::Wall { .. }),
        }
    }
}

impl fmt::Display for PropertyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a numeric field. Empty, non-numeric or non-finite input is 0.
pub fn parse_number(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse a counting field (table number, seats): rounded, at least 1.
pub fn parse_count(input: &str) -> u32 {
    let value = parse_number(input).round();
    if value < 1.0 {
        1
    } else if value > f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

/// Apply a raw text edit of `field` to the element with `id`.
///
/// Unknown ids and fields the element does not have leave the plan
/// unchanged.
#[must_use]
pub fn apply_property(plan: FloorPlan, id: &str, field: PropertyField, input: &str) -> FloorPlan {
    let Some(element) = plan.element(id) else {
        log::debug!("set_property: unknown id {}", id);
        return plan;
    };
    if !field.applies_to(&element.kind) {
        log::debug!("set_property: {} has no {} field", id, field);
        return plan;
    }

    let Point { x, y } = element.position;
    let Size { width, height } = element.size;

    let update = match field {
        PropertyField::X => ElementUpdate::position(Point::new(parse_number(input).max(0.0), y)),
        PropertyField::Y => ElementUpdate::position(Point::new(x, parse_number(input).max(0.0))),
        PropertyField::Width => ElementUpdate {
            size: Some(Size::new(parse_number(input).max(MIN_SIZE), height)),
            ..Default::default()
        },
        PropertyField::Height => ElementUpdate {
            size: Some(Size::new(width, parse_number(input).max(MIN_SIZE))),
            ..Default::default()
        },
        PropertyField::Rotation => ElementUpdate::rotation(parse_number(input)),
        PropertyField::Name => ElementUpdate {
            name: Some(input.to_string()),
            ..Default::default()
        },
        PropertyField::Number => ElementUpdate {
            number: Some(parse_count(input)),
            ..Default::default()
        },
        PropertyField::Seats => ElementUpdate {
            seats: Some(parse_count(input)),
            ..Default::default()
        },
        PropertyField::Thickness => ElementUpdate {
            thickness: Some(parse_number(input).max(1.0)),
            ..Default::default()
        },
    };

    plan.update_element(id, &update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;

    fn plan_with(element_type: ElementType) -> (FloorPlan, String) {
        FloorPlan::default().add_element(element_type, Point::new(100.0, 100.0))
    }

    #[test]
    fn test_parse_number() {
        assert!((parse_number(" 42.5 ") - 42.5).abs() < f64::EPSILON);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
        assert!((parse_number("-12") + 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("6"), 6);
        assert_eq!(parse_count("2.6"), 3);
        assert_eq!(parse_count(""), 1);
        assert_eq!(parse_count("-4"), 1);
        assert_eq!(parse_count("1e20"), u32::MAX);
    }

    #[test]
    fn test_width_and_height_clamped() {
        let (plan, id) = plan_with(ElementType::Stage);
        let plan = apply_property(plan, &id, PropertyField::Width, "5");
        let plan = apply_property(plan, &id, PropertyField::Height, "");
        let element = plan.element(&id).unwrap();
        assert_eq!(element.size, Size::new(MIN_SIZE, MIN_SIZE));

        let plan = apply_property(plan, &id, PropertyField::Width, "250");
        assert!((plan.element(&id).unwrap().size.width - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_position_clamped_to_room_origin() {
        let (plan, id) = plan_with(ElementType::Bar);
        let plan = apply_property(plan, &id, PropertyField::X, "-30");
        let plan = apply_property(plan, &id, PropertyField::Y, "333");
        // Manual edits are not snapped.
        assert_eq!(plan.element(&id).unwrap().position, Point::new(0.0, 333.0));
    }

    #[test]
    fn test_rotation_normalized() {
        let (plan, id) = plan_with(ElementType::Table);
        let plan = apply_property(plan, &id, PropertyField::Rotation, "-45");
        assert!((plan.element(&id).unwrap().rotation - 315.0).abs() < 1e-10);
        let plan = apply_property(plan, &id, PropertyField::Rotation, "oops");
        assert_eq!(plan.element(&id).unwrap().rotation, 0.0);
    }

    #[test]
    fn test_table_fields() {
        let (plan, id) = plan_with(ElementType::Table);
        let plan = apply_property(plan, &id, PropertyField::Seats, "0");
        let plan = apply_property(plan, &id, PropertyField::Number, "12");
        match &plan.element(&id).unwrap().kind {
            ElementKind::Table { number, seats, .. } => {
                assert_eq!(*number, 12);
                assert_eq!(*seats, 1);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_inapplicable_field_ignored() {
        let (plan, id) = plan_with(ElementType::Table);
        let before = plan.clone();
        let plan = apply_property(plan, &id, PropertyField::Name, "VIP");
        let plan = apply_property(plan, &id, PropertyField::Thickness, "9");
        assert_eq!(plan, before);

        let (plan, id) = plan_with(ElementType::Bar);
        let before = plan.clone();
        let plan = apply_property(plan, &id, PropertyField::Seats, "8");
        assert_eq!(plan, before);
    }

    #[test]
    fn test_wall_thickness_and_name() {
        let (plan, id) = plan_with(ElementType::Wall);
        let plan = apply_property(plan, &id, PropertyField::Thickness, "0.2");
        let plan = apply_property(plan, &id, PropertyField::Name, "North wall");
        let element = plan.element(&id).unwrap();
        assert_eq!(element.label(), "North wall");
        match &element.kind {
            ElementKind::Wall { thickness, .. } => assert!((thickness - 1.0).abs() < f64::EPSILON),
            other => panic!("expected wall, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let (plan, _) = plan_with(ElementType::Pillar);
        let before = plan.clone();
        let plan = apply_property(plan, "ghost", PropertyField::Width, "500");
        assert_eq!(plan, before);
    }

    #[test]
    fn test_field_serde() {
        let field: PropertyField = serde_json::from_str("\"thickness\"").unwrap();
        assert_eq!(field, PropertyField::Thickness);
        assert_eq!(serde_json::to_string(&PropertyField::X).unwrap(), "\"x\"");
    }
}
