//! Macro para declarar clases hidratables con campos públicos.
//!
//! Uso:
//!   hydratable! {
//!       pub struct Person as "Person" {
//!           pub name: String,
//!           pub birth_date as "birthDate": Option<DateTime<FixedOffset>>,
//!       }
//!   }
//!
//! Genera el struct (con `Debug, Clone, Default, PartialEq`), y las
//! implementaciones de `Hydratable`, `HydratableClass` y `PropertyType`. El
//! literal tras `as` en un campo es el nombre declarado de la propiedad
//! (por defecto el nombre del campo).

#[doc(hidden)]
#[macro_export]
macro_rules! __hydratable_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $decl:literal) => {
        $decl
    };
}

#[macro_export]
macro_rules! hydratable {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident as $class:literal {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident $(as $decl:literal)? : $fty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $fty, )*
        }

        impl $crate::model::Hydratable for $name {
            fn class_name(&self) -> &str {
                $class
            }

            #[allow(unused_variables)]
            fn read_field(&self, name: &str) -> Option<$crate::model::PropertyValue> {
                $(
                    if name == $crate::__hydratable_name!($field $(, $decl)?) {
                        return Some(<$fty as $crate::model::PropertyType>::to_property(&self.$field));
                    }
                )*
                None
            }

            #[allow(unused_variables)]
            fn write_field(&mut self,
                           name: &str,
                           value: $crate::model::PropertyValue)
                           -> Option<Result<(), $crate::errors::CastError>> {
                $(
                    if name == $crate::__hydratable_name!($field $(, $decl)?) {
                        return Some(<$fty as $crate::model::PropertyType>::from_property(value).map(|v| self.$field = v));
                    }
                )*
                None
            }

            fn clone_boxed(&self) -> Box<dyn $crate::model::Hydratable> {
                Box::new(self.clone())
            }

            fn eq_dyn(&self, other: &dyn $crate::model::Hydratable) -> bool {
                other.as_any().downcast_ref::<$name>().map_or(false, |o| o == self)
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
                self
            }
        }

        impl $crate::model::HydratableClass for $name {
            const CLASS_NAME: &'static str = $class;
        }

        impl $crate::model::PropertyType for $name {
            fn from_property(value: $crate::model::PropertyValue) -> Result<Self, $crate::errors::CastError> {
                match value {
                    $crate::model::PropertyValue::Object(obj) => {
                        <dyn $crate::model::Hydratable>::downcast::<$name>(obj).map(|b| *b)
                    }
                    other => Err($crate::errors::CastError::incompatible($class, other.kind())),
                }
            }

            fn to_property(&self) -> $crate::model::PropertyValue {
                $crate::model::PropertyValue::Object(Box::new(self.clone()))
            }
        }
    };
}
