use crate::{CordonError, Result};
use k8s_openapi::api::core::v1::{Container, Pod};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

/// Resource quantities for nodes and pods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceQuantities {
    /// CPU in millicores (1000 = 1 core)
    pub cpu_millicores: i64,
    /// Memory in bytes
    pub memory_bytes: i64,
}

impl ResourceQuantities {
    /// Parse CPU string (e.g., "2", "1000m", "0.5")
    pub fn parse_cpu(s: &str) -> Result<i64> {
        let invalid = || CordonError::invalid_quantity("cpu", s);
        if s.starts_with('-') {
            return Err(invalid());
        }

        if let Some(m) = s.strip_suffix('m') {
            // Millicores
            m.parse::<i64>().map_err(|_| invalid())
        } else {
            // Cores as float
            let cores = s.parse::<f64>().map_err(|_| invalid())?;
            if !cores.is_finite() {
                return Err(invalid());
            }
            Ok((cores * 1000.0).round() as i64)
        }
    }

    /// Parse memory string (e.g., "128Mi", "1Gi", "1G", "1024")
    pub fn parse_memory(s: &str) -> Result<i64> {
        const SUFFIXES: [(&str, i64); 8] = [
            ("Ki", 1 << 10),
            ("Mi", 1 << 20),
            ("Gi", 1 << 30),
            ("Ti", 1 << 40),
            ("k", 1_000),
            ("M", 1_000_000),
            ("G", 1_000_000_000),
            ("T", 1_000_000_000_000),
        ];

        let invalid = || CordonError::invalid_quantity("memory", s);
        if s.starts_with('-') {
            return Err(invalid());
        }

        for (suffix, multiplier) in SUFFIXES {
            if let Some(num) = s.strip_suffix(suffix) {
                return num
                    .parse::<i64>()
                    .ok()
                    .and_then(|n| n.checked_mul(multiplier))
                    .ok_or_else(invalid);
            }
        }

        // Plain bytes
        s.parse::<i64>().map_err(|_| invalid())
    }

    /// Get CPU and memory from a resource map (k8s-openapi format).
    ///
    /// Missing entries count as zero; malformed entries are an error.
    pub fn from_k8s_resource_map(resources: &BTreeMap<String, Quantity>) -> Result<Self> {
        let cpu_millicores = resources
            .get("cpu")
            .map(|q| Self::parse_cpu(&q.0))
            .transpose()?
            .unwrap_or(0);

        let memory_bytes = resources
            .get("memory")
            .map(|q| Self::parse_memory(&q.0))
            .transpose()?
            .unwrap_or(0);

        Ok(Self {
            cpu_millicores,
            memory_bytes,
        })
    }

    fn container_requests(container: &Container) -> Result<Self> {
        match container
            .resources
            .as_ref()
            .and_then(|r| r.requests.as_ref())
        {
            Some(requests) => Self::from_k8s_resource_map(requests),
            None => Ok(Self::default()),
        }
    }

    /// Effective requests of a pod.
    ///
    /// Regular containers run together and are summed; init containers run
    /// one at a time, so each dimension is the max of the sum and the largest
    /// single init container.
    pub fn pod_requests(pod: &Pod) -> Result<Self> {
        let Some(spec) = &pod.spec else {
            return Ok(Self::default());
        };

        let mut total = Self::default();
        for container in &spec.containers {
            total += Self::container_requests(container)?;
        }

        for container in spec.init_containers.iter().flatten() {
            let init = Self::container_requests(container)?;
            total.cpu_millicores = total.cpu_millicores.max(init.cpu_millicores);
            total.memory_bytes = total.memory_bytes.max(init.memory_bytes);
        }

        Ok(total)
    }
}

impl Add for ResourceQuantities {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            cpu_millicores: self.cpu_millicores.saturating_add(rhs.cpu_millicores),
            memory_bytes: self.memory_bytes.saturating_add(rhs.memory_bytes),
        }
    }
}

impl AddAssign for ResourceQuantities {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{PodSpec, ResourceRequirements};

    fn container(cpu: &str, memory: &str) -> Container {
        let mut requests = BTreeMap::new();
        requests.insert("cpu".to_string(), Quantity(cpu.to_string()));
        requests.insert("memory".to_string(), Quantity(memory.to_string()));
        Container {
            name: "c".to_string(),
            resources: Some(ResourceRequirements {
                requests: Some(requests),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_cpu() {
        assert_eq!(ResourceQuantities::parse_cpu("1").unwrap(), 1000);
        assert_eq!(ResourceQuantities::parse_cpu("0.5").unwrap(), 500);
        assert_eq!(ResourceQuantities::parse_cpu("100m").unwrap(), 100);
        assert_eq!(ResourceQuantities::parse_cpu("2").unwrap(), 2000);
        assert!(ResourceQuantities::parse_cpu("two").is_err());
        assert!(ResourceQuantities::parse_cpu("1.5m").is_err());
    }

    #[test]
    fn test_parse_memory() {
        assert_eq!(ResourceQuantities::parse_memory("1024").unwrap(), 1024);
        assert_eq!(ResourceQuantities::parse_memory("1Ki").unwrap(), 1024);
        assert_eq!(
            ResourceQuantities::parse_memory("128Mi").unwrap(),
            128 * 1024 * 1024
        );
        assert_eq!(
            ResourceQuantities::parse_memory("1Gi").unwrap(),
            1024 * 1024 * 1024
        );
        assert_eq!(ResourceQuantities::parse_memory("2G").unwrap(), 2_000_000_000);
        assert!(ResourceQuantities::parse_memory("lots").is_err());
    }

    #[test]
    fn test_negative_quantities_rejected() {
        for cpu in ["-1", "-0.5", "-100m"] {
            let err = ResourceQuantities::parse_cpu(cpu).unwrap_err();
            assert!(matches!(err, CordonError::InvalidQuantity { .. }));
        }
        for memory in ["-1", "-1Gi", "-512M"] {
            let err = ResourceQuantities::parse_memory(memory).unwrap_err();
            assert!(matches!(err, CordonError::InvalidQuantity { .. }));
        }
        assert_eq!(ResourceQuantities::parse_cpu("0").unwrap(), 0);
    }

    #[test]
    fn test_pod_requests_sums_containers_and_respects_init() {
        let mut pod = Pod::default();
        pod.spec = Some(PodSpec {
            containers: vec![container("250m", "64Mi"), container("250m", "64Mi")],
            init_containers: Some(vec![container("2", "32Mi")]),
            ..Default::default()
        });

        let requests = ResourceQuantities::pod_requests(&pod).unwrap();
        assert_eq!(requests.cpu_millicores, 2000);
        assert_eq!(requests.memory_bytes, 128 * 1024 * 1024);
    }

    #[test]
    fn test_pod_requests_without_spec_is_zero() {
        let requests = ResourceQuantities::pod_requests(&Pod::default()).unwrap();
        assert_eq!(requests, ResourceQuantities::default());
    }

    #[test]
    fn test_pod_requests_rejects_malformed_quantity() {
        let mut pod = Pod::default();
        pod.spec = Some(PodSpec {
            containers: vec![container("abc", "64Mi")],
            ..Default::default()
        });

        let err = ResourceQuantities::pod_requests(&pod).unwrap_err();
        assert!(matches!(err, CordonError::InvalidQuantity { .. }));
    }
}
