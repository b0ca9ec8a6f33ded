/// The UPnP services a renderer exposes to this engine
///
/// Each service has a fixed control endpoint and a service identifier used in
/// both the `SOAPAction` header and the action element's namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// AVTransport service - playback, seeking, queue and source selection
    AVTransport,

    /// RenderingControl service - volume, mute, EQ
    RenderingControl,

    /// DeviceProperties service - device-level settings such as the status light
    DeviceProperties,
}

/// Contains the endpoint and service identifier for a UPnP service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// The HTTP control endpoint path
    pub endpoint: &'static str,

    /// The versioned service identifier, e.g. `AVTransport:1`
    pub service_id: &'static str,
}

impl Service {
    /// Get the name of this service as a string
    pub fn name(&self) -> &'static str {
        match self {
            Service::AVTransport => "AVTransport",
            Service::RenderingControl => "RenderingControl",
            Service::DeviceProperties => "DeviceProperties",
        }
    }

    /// Get the endpoint and service identifier for this service
    pub fn info(&self) -> ServiceInfo {
        match self {
            Service::AVTransport => ServiceInfo {
                endpoint: "/MediaRenderer/AVTransport/Control",
                service_id: "AVTransport:1",
            },
            Service::RenderingControl => ServiceInfo {
                endpoint: "/MediaRenderer/RenderingControl/Control",
                service_id: "RenderingControl:1",
            },
            Service::DeviceProperties => ServiceInfo {
                endpoint: "/DeviceProperties/Control",
                service_id: "DeviceProperties:1",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_endpoints() {
        assert_eq!(Service::AVTransport.info().endpoint, "/MediaRenderer/AVTransport/Control");
        assert_eq!(
            Service::RenderingControl.info().endpoint,
            "/MediaRenderer/RenderingControl/Control"
        );
        assert_eq!(Service::DeviceProperties.info().endpoint, "/DeviceProperties/Control");
    }

    #[test]
    fn test_service_id_starts_with_name() {
        let services = [
            Service::AVTransport,
            Service::RenderingControl,
            Service::DeviceProperties,
        ];

        for service in services {
            let info = service.info();
            assert!(info.service_id.starts_with(service.name()));
            assert!(info.service_id.ends_with(":1"));
        }
    }
}
