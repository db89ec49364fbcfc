use crate::domain::rule::DiscountType;

/// Static lookup from discount type and selected visual style to a block
/// template handle. An out-of-range style index yields `None`, which the
/// driver treats as "no renderable block".
pub fn map_handle(discount_type: DiscountType, selected_style: u8) -> Option<&'static str> {
    use DiscountType::*;

    Some(match (discount_type, selected_style) {
        (VolumeSameProduct, 0) => "volume-classic",
        (VolumeSameProduct, 1) => "volume-cards",
        (VolumeSameProduct, 2) => "volume-horizontal",
        (VolumeSameProduct, 3) => "volume-minimal",
        (Bogo, 0) => "bogo-classic",
        (Bogo, 1) => "bogo-cards",
        (Bogo, 2) => "bogo-horizontal",
        (Bogo, 3) => "bogo-minimal",
        (QuantityBreakMultiProduct, 0) => "bundle-classic",
        (QuantityBreakMultiProduct, 1) => "bundle-cards",
        (QuantityBreakMultiProduct, 2) => "bundle-horizontal",
        (QuantityBreakMultiProduct, 3) => "bundle-minimal",
        _ => return None,
    })
}
