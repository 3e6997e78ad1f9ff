use crate::models::Permission;

/// Anything that can answer "is this permission currently granted"
pub trait PermissionChecker {
    /// A failing platform query should report `false`
    fn is_granted(&self, permission: &Permission) -> bool;
}

/// Returns the permissions out of `required` that still need to be granted,
/// in their original order
pub fn permissions_to_request<C>(checker: &C, required: &[Permission]) -> Vec<Permission>
where
    C: PermissionChecker + ?Sized,
{
    required
        .iter()
        .filter(|p| !checker.is_granted(p))
        .cloned()
        .collect()
}

/// True when every permission in `required` is granted
pub fn all_granted<C>(checker: &C, required: &[Permission]) -> bool
where
    C: PermissionChecker + ?Sized,
{
    required.iter().all(|p| checker.is_granted(p))
}
