/// Generate named pin accessors plus their `_number` and `_mask` forms
///
/// Every accessor is a rename of a table lookup, so all three forms resolve
/// through the same call.
macro_rules! pin_aliases {
    (
        ($id:ident: $id_ty:ty, $route:ident: $route_ty:ty);
        $(
            $(#[$meta:meta])*
            $name:ident, $number:ident, $mask:ident => $lookup:expr;
        )+
    ) => {
        $(
            $(#[$meta])*
            pub fn $name<C: Chip>($id: $id_ty, $route: $route_ty) -> HalResult<PinLocation> {
                $lookup
            }

            #[doc = concat!("Pin number of [`", stringify!($name), "`]")]
            pub fn $number<C: Chip>($id: $id_ty, $route: $route_ty) -> HalResult<u8> {
                $name::<C>($id, $route).map(PinLocation::number)
            }

            #[doc = concat!("Pin mask of [`", stringify!($name), "`]")]
            pub fn $mask<C: Chip>($id: $id_ty, $route: $route_ty) -> HalResult<u8> {
                $name::<C>($id, $route).map(PinLocation::mask)
            }
        )+
    };
}

/// Generate [`crate::portmux::Portmux`] methods that resolve a named pin on
/// the route currently set in hardware
///
/// Each call reads the route register once. Callers that need several pins
/// from one consistent route should read the route themselves and use the
/// free functions.
macro_rules! current_pin_aliases {
    (
        $family:ident, $id:ident: $id_ty:ty;
        $( $name:ident, $number:ident, $mask:ident; )+
    ) => {
        $(
            #[doc = concat!("[`crate::", stringify!($family), "::", stringify!($name), "`] on the current route")]
            pub fn $name(&self, $id: $id_ty) -> HalResult<PinLocation> {
                crate::$family::$name::<C>($id, self.route($id)?)
            }

            #[doc = concat!("[`crate::", stringify!($family), "::", stringify!($number), "`] on the current route")]
            pub fn $number(&self, $id: $id_ty) -> HalResult<u8> {
                crate::$family::$number::<C>($id, self.route($id)?)
            }

            #[doc = concat!("[`crate::", stringify!($family), "::", stringify!($mask), "`] on the current route")]
            pub fn $mask(&self, $id: $id_ty) -> HalResult<u8> {
                crate::$family::$mask::<C>($id, self.route($id)?)
            }
        )+
    };
}
