mod deployment;
mod main;
mod nginx_deploy;
mod reconcile;
#[cfg(test)]
mod testing;

pub use deployment::*;
pub use main::*;
pub use nginx_deploy::*;
pub use reconcile::*;

/// Controller name, also used as field manager and event reporter
pub static NGINX_MANAGER_NAME: &str = "nginxdeploy";
