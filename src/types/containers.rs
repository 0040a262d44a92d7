use crate::ast::{FromInputValue, InputType, InputValue, ToInputValue, Type};

impl<T: FromInputValue> FromInputValue for Option<T> {
    type Error = T::Error;

    fn from_input_value(v: &InputValue) -> Result<Self, Self::Error> {
        match v {
            InputValue::Null => Ok(None),
            v => v.convert().map(Some),
        }
    }
}

impl<T: InputType> InputType for Option<T> {
    fn input_type() -> Type {
        T::input_type().into_nullable()
    }
}

impl<T: ToInputValue> ToInputValue for Option<T> {
    fn to_input_value(&self) -> InputValue {
        self.as_ref()
            .map_or(InputValue::Null, ToInputValue::to_input_value)
    }
}

impl<T: FromInputValue> FromInputValue for Vec<T> {
    type Error = T::Error;

    fn from_input_value(v: &InputValue) -> Result<Self, Self::Error> {
        match v {
            InputValue::List(l) => l.iter().map(InputValue::convert).collect(),
            // See "Input Coercion" on List types:
            // https://spec.graphql.org/October2021#sec-Combining-List-and-Non-Null
            other => other.convert().map(|e| vec![e]),
        }
    }
}

impl<T: InputType> InputType for Vec<T> {
    fn input_type() -> Type {
        Type::NonNullList(Box::new(T::input_type()))
    }
}

impl<T: ToInputValue> ToInputValue for Vec<T> {
    fn to_input_value(&self) -> InputValue {
        InputValue::list(self.iter().map(T::to_input_value).collect())
    }
}
