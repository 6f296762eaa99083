//! Member inheritance by access level.

use jprops_common::{Access, Modifiers};
use jprops_symbols::{ClassId, SymbolError, SymbolModel};

/// Whether a member declared in `owner` with `modifiers` is inherited into
/// (visible by simple name from) `origin`.
///
/// - members of `origin` itself: always
/// - static interface members: never
/// - public and protected: always
/// - private: only within the same outermost class
/// - package access: only within the same package
pub fn is_inherited(
    model: &dyn SymbolModel,
    owner: ClassId,
    modifiers: Modifiers,
    origin: ClassId,
) -> Result<bool, SymbolError> {
    if owner == origin {
        return Ok(true);
    }
    let owner_class = model.class(owner)?;
    if modifiers.is_static() && owner_class.is_interface() {
        return Ok(false);
    }
    Ok(match modifiers.access() {
        Access::Public | Access::Protected => true,
        Access::Private => model.outermost_class(owner)? == model.outermost_class(origin)?,
        Access::Package => owner_class.package == model.class(origin)?.package,
    })
}
