use std::any::Any;

use json_lenient::{
    from_str, Decode, DecodeError, DiscriminatorKey, TypeFamily, ValueDecoder,
};

const BAR_FIXTURE: &str = r#"
{
    "drinks": [
        {
            "type": "drink",
            "description": "All natural"
        },
        {
            "type": "beer",
            "description": "best drunk on fridays after work",
            "alcohol_content": "5%"
        }
    ]
}
"#;

trait Beverage {
    fn description(&self) -> &str;
    fn as_any(&self) -> &dyn Any;
}

struct Drink {
    description: String,
}

impl Decode for Drink {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
        let c = d.keyed()?;
        Ok(Drink {
            description: c.decode("description")?,
        })
    }
}

impl Beverage for Drink {
    fn description(&self) -> &str {
        &self.description
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct Beer {
    description: String,
    alcohol_content: String,
}

impl Decode for Beer {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
        let c = d.keyed()?;
        Ok(Beer {
            description: c.decode("description")?,
            alcohol_content: c.decode("alcohol_content")?,
        })
    }
}

impl Beverage for Beer {
    fn description(&self) -> &str {
        &self.description
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn drink_family() -> TypeFamily<Box<dyn Beverage>> {
    TypeFamily::new(DiscriminatorKey::Type)
        .variant("drink", |d| {
            Ok(Box::new(Drink::decode(d)?) as Box<dyn Beverage>)
        })
        .variant("beer", |d| {
            Ok(Box::new(Beer::decode(d)?) as Box<dyn Beverage>)
        })
}

struct Bar {
    drinks: Vec<Box<dyn Beverage>>,
}

impl std::fmt::Debug for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bar").finish_non_exhaustive()
    }
}

impl Decode for Bar {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
        let c = d.keyed()?;
        Ok(Bar {
            drinks: c.decode_family("drinks", &drink_family())?,
        })
    }
}

#[test]
fn family_dispatch_selects_the_concrete_type_per_element() {
    let bar: Bar = from_str(BAR_FIXTURE).unwrap();

    assert_eq!(bar.drinks.len(), 2);
    assert_eq!(bar.drinks[0].description(), "All natural");
    assert_eq!(bar.drinks[1].description(), "best drunk on fridays after work");

    // The extra field only exists on the element dispatched as Beer.
    assert!(bar.drinks[0].as_any().downcast_ref::<Beer>().is_none());
    let beer = bar.drinks[1].as_any().downcast_ref::<Beer>().unwrap();
    assert_eq!(beer.alcohol_content, "5%");
}

#[test]
fn elements_keep_input_order() {
    let bar: Bar = from_str(
        r#"{ "drinks": [
            { "type": "beer", "description": "b", "alcohol_content": "4%" },
            { "type": "drink", "description": "d" }
        ] }"#,
    )
    .unwrap();
    assert!(bar.drinks[0].as_any().downcast_ref::<Beer>().is_some());
    assert!(bar.drinks[1].as_any().downcast_ref::<Drink>().is_some());
}

#[test]
fn unknown_discriminator_fails_the_whole_decode() {
    let result: Result<Bar, _> = from_str(
        r#"{ "drinks": [
            { "type": "drink", "description": "ok" },
            { "type": "wine", "description": "unregistered" }
        ] }"#,
    );
    match result.unwrap_err() {
        DecodeError::UnknownDiscriminator { key, value } => {
            assert_eq!(key, "type");
            assert_eq!(value, "wine");
        }
        other => panic!("expected UnknownDiscriminator, got {other}"),
    }
}

#[test]
fn element_decode_failure_aborts_without_recovery() {
    // The second element carries a known tag but is missing a required
    // field; the family decode has no per-element recovery.
    let result: Result<Bar, _> = from_str(
        r#"{ "drinks": [
            { "type": "drink", "description": "ok" },
            { "type": "beer", "description": "no alcohol_content" }
        ] }"#,
    );
    assert!(matches!(result.unwrap_err(), DecodeError::KeyNotFound(_)));
}

#[test]
fn alternate_discriminator_keys_are_supported() {
    struct Shape {
        area: i64,
    }
    impl Decode for Shape {
        fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
            let c = d.keyed()?;
            Ok(Shape {
                area: c.decode("area")?,
            })
        }
    }

    struct Canvas {
        shapes: Vec<Shape>,
    }
    impl Decode for Canvas {
        fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
            let family: TypeFamily<Shape> = TypeFamily::new(DiscriminatorKey::ModelType)
                .variant("square", Shape::decode)
                .variant("circle", Shape::decode);
            let c = d.keyed()?;
            Ok(Canvas {
                shapes: c.decode_family("shapes", &family)?,
            })
        }
    }

    let canvas: Canvas = from_str(
        r#"{ "shapes": [
            { "modelType": "square", "area": 4 },
            { "modelType": "circle", "area": 3 }
        ] }"#,
    )
    .unwrap();
    assert_eq!(canvas.shapes[0].area, 4);
    assert_eq!(canvas.shapes[1].area, 3);
}
