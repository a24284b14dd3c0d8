//! Freezing enum fields through the process-wide registry.

use tidyenum_db::fields::{EnumCharField, EnumIntegerField};
use tidyenum_migrations::{register_enum_fields, FrozenModel, INTROSPECTION};
use tidyenum_macros::LabelledEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, LabelledEnum)]
#[labelled(name = "Status")]
enum Status {
    #[labelled(value = 1, label = "Active")]
    Active,
    #[labelled(value = 2, label = "Done")]
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, LabelledEnum)]
#[labelled(name = "Colour")]
enum Colour {
    #[labelled(value = "r", label = "Red")]
    Red,
    #[labelled(value = "g", label = "Green")]
    Green,
}

#[test]
fn test_member_defaults_freeze_as_primitives() {
    register_enum_fields(&INTROSPECTION).unwrap();

    let status = EnumIntegerField::builder("status")
        .enum_type::<Status>()
        .default(Status::Done)
        .build();
    let colour = EnumCharField::builder("colour")
        .enum_type::<Colour>()
        .default(Colour::Green)
        .max_length(1)
        .build();

    let model = FrozenModel::new("shop.Order")
        .field("status", INTROSPECTION.triple(&status).unwrap())
        .field("colour", INTROSPECTION.triple(&colour).unwrap());

    assert_eq!(model.fields["status"].kwarg("default"), Some("2"));
    assert_eq!(model.fields["colour"].kwarg("default"), Some("'g'"));
    assert_eq!(
        model.fields["colour"].class_path,
        "tidyenum.fields.EnumCharField"
    );

    let restored = FrozenModel::from_json(&model.to_json().unwrap()).unwrap();
    assert_eq!(restored, model);
}
