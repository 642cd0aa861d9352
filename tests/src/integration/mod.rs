//! Integration flows across subsystems.

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
mod case_flows;
#[cfg(test)]
mod catalog_flows;
#[cfg(test)]
mod notification_flows;
