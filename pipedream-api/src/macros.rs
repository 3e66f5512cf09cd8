/// Chained by-value setter for request builders.
///
/// `setter!(name: Ty)` assigns `self.name`, `setter!(query.name: Ty)` assigns a
/// field of a nested query or body struct. Prefixed with `opt`, the value is
/// wrapped in `Some`.
macro_rules! setter {
    (@emit [$($wrap:tt)*] $name:ident => $($place:ident).+ : $ty:ty) => {
        pub fn $name<T>(mut self, $name: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$($place).+ = $($wrap)*($name.into());
            self
        }
    };

    (opt $field:ident . $subfield:ident : $ty:ty) => {
        $crate::macros::setter!(@emit [Some] $subfield => $field.$subfield : $ty);
    };

    (opt $field:ident : $ty:ty) => {
        $crate::macros::setter!(@emit [Some] $field => $field : $ty);
    };

    ($field:ident . $subfield:ident : $ty:ty) => {
        $crate::macros::setter!(@emit [] $subfield => $field.$subfield : $ty);
    };

    ($field:ident : $ty:ty) => {
        $crate::macros::setter!(@emit [] $field => $field : $ty);
    };
}

pub(crate) use setter;
