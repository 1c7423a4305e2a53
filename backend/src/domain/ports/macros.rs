//! `define_port_error!`: declares a port error enum with `thiserror`
//! messages and one snake_case constructor per variant. Constructor
//! parameters take `impl Into<T>` so callers can pass `&str` for `String`
//! fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use crate::domain::ItemId;

    define_port_error! {
        pub enum LedgerPortError {
            Unreachable => "ledger unreachable",
            Query { message: String } => "ledger query failed: {message}",
            Conflict { item_id: ItemId, revision: u32 } =>
                "item {item_id} changed (revision {revision})",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LedgerPortError::unreachable().to_string(), "ledger unreachable");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = LedgerPortError::query("timeout");
        assert_eq!(err.to_string(), "ledger query failed: timeout");
    }

    #[test]
    fn domain_fields_keep_their_types() {
        let item_id = ItemId::new(19_721).expect("valid id");
        let err = LedgerPortError::conflict(item_id, 3_u32);
        assert_eq!(err, LedgerPortError::Conflict { item_id, revision: 3 });
        assert_eq!(err.to_string(), "item 19721 changed (revision 3)");
    }
}
