/// Resolves the tenant the user is currently operating in.
///
/// `None` means no tenant is selected; loads then fail fast with a
/// precondition error instead of reaching the network.
pub trait TenantResolver: Send + Sync {
    fn current_tenant_id(&self) -> Option<String>;
}

/// Resolver for single-tenant deployments and tests: always the same tenant.
#[derive(Debug, Clone)]
pub struct FixedTenant(pub String);

impl TenantResolver for FixedTenant {
    fn current_tenant_id(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
