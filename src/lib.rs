#[allow(non_snake_case)]
pub mod Balancer;
#[allow(non_snake_case)]
pub mod Composition;
