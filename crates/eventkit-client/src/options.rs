//! The client option set.
//!
//! Every function returns a [`ClientOption`]; none of them touch a
//! configuration until the option is applied.

use std::sync::Arc;

use eventkit_core::{ConfigError, ContextDecorator};
use eventkit_observability::ObservabilityService;

use crate::config::{ClientConfig, ClientOption};
use crate::defaulters::{
    default_id_to_uuid_if_not_set, default_time_to_now_if_not_set, EventDefaulter,
};

/// Appends `defaulter` to the end of the defaulter chain.
/// Fails with [`ConfigError::MissingDefaulter`] when given `None`.
pub fn with_event_defaulter(defaulter: impl Into<Option<EventDefaulter>>) -> ClientOption {
    let defaulter = defaulter.into();
    ClientOption::new("with_event_defaulter", move |c: &mut ClientConfig| {
        let defaulter = defaulter.clone().ok_or(ConfigError::MissingDefaulter)?;
        c.event_defaulters.push(defaulter);
        Ok(())
    })
}

/// Appends a decorator forcing binary encoding of outgoing events.
pub fn with_force_binary() -> ClientOption {
    ClientOption::new("with_force_binary", |c: &mut ClientConfig| {
        c.outbound_decorators.push(ContextDecorator::force_binary());
        Ok(())
    })
}

/// Appends a decorator forcing structured encoding of outgoing events.
pub fn with_force_structured() -> ClientOption {
    ClientOption::new("with_force_structured", |c: &mut ClientConfig| {
        c.outbound_decorators.push(ContextDecorator::force_structured());
        Ok(())
    })
}

/// Appends [`default_id_to_uuid_if_not_set`] to the defaulter chain.
pub fn with_uuids() -> ClientOption {
    ClientOption::new("with_uuids", |c: &mut ClientConfig| {
        c.event_defaulters.push(default_id_to_uuid_if_not_set());
        Ok(())
    })
}

/// Appends [`default_time_to_now_if_not_set`] to the defaulter chain.
pub fn with_time_now() -> ClientOption {
    ClientOption::new("with_time_now", |c: &mut ClientConfig| {
        c.event_defaulters.push(default_time_to_now_if_not_set());
        Ok(())
    })
}

/// Retired: trace context is no longer propagated through an event
/// extension. Accepted for compatibility and has no effect.
#[deprecated(note = "no-op; trace propagation through event extensions was removed")]
pub fn with_trace_propagation() -> ClientOption {
    ClientOption::identity("with_trace_propagation")
}

/// Number of workers polling inbound sources. 0 selects the platform default.
pub fn with_poll_concurrency(workers: usize) -> ClientOption {
    ClientOption::new("with_poll_concurrency", move |c: &mut ClientConfig| {
        c.poll_concurrency = workers;
        Ok(())
    })
}

/// Backend receiving codec and client reports.
pub fn with_observability_service(service: Arc<dyn ObservabilityService>) -> ClientOption {
    ClientOption::new("with_observability_service", move |c: &mut ClientConfig| {
        c.observability = Some(Arc::clone(&service));
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventkit_core::{apply_options, EncodingMode};
    use eventkit_observability::NoopObservability;

    fn names(c: &ClientConfig) -> Vec<&'static str> {
        c.event_defaulters().iter().map(|d| d.name()).collect()
    }

    #[test]
    fn defaulters_append_in_order() {
        let custom = EventDefaulter::new("custom", |e| e);
        let c = ClientConfig::from_options(&[
            with_time_now(),
            with_event_defaulter(custom),
            with_uuids(),
        ])
        .unwrap();
        assert_eq!(
            names(&c),
            vec![
                "default_time_to_now_if_not_set",
                "custom",
                "default_id_to_uuid_if_not_set"
            ]
        );
    }

    #[test]
    fn missing_defaulter_is_rejected() {
        let err = ClientConfig::from_options(&[with_event_defaulter(None)]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDefaulter));
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn encoding_decorators_are_additive() {
        let c = ClientConfig::from_options(&[with_force_binary(), with_force_structured()])
            .unwrap();
        let names: Vec<_> = c.outbound_decorators().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["force_binary", "force_structured"]);
        assert_eq!(c.outbound_context().encoding, EncodingMode::Structured);
    }

    #[test]
    fn failure_stops_the_sequence() {
        let mut c = ClientConfig::default();
        let err = apply_options(
            &mut c,
            &[with_uuids(), with_event_defaulter(None), with_poll_concurrency(8)],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingDefaulter));
        assert_eq!(names(&c), vec!["default_id_to_uuid_if_not_set"]);
        assert_eq!(c.poll_concurrency(), 0);
    }

    #[test]
    fn scalar_options_last_write_wins() {
        let c = ClientConfig::from_options(&[
            with_poll_concurrency(4),
            with_observability_service(Arc::new(NoopObservability)),
            with_poll_concurrency(16),
        ])
        .unwrap();
        assert_eq!(c.poll_concurrency(), 16);
        assert!(c.observability().is_some());
    }

    #[test]
    #[allow(deprecated)]
    fn trace_propagation_changes_nothing() {
        let mut c = ClientConfig::from_options(&[with_uuids(), with_force_binary()]).unwrap();
        let before = format!("{c:?}");
        apply_options(&mut c, &[with_trace_propagation()]).unwrap();
        assert_eq!(format!("{c:?}"), before);

        let empty = ClientConfig::from_options(&[with_trace_propagation()]).unwrap();
        assert_eq!(format!("{empty:?}"), format!("{:?}", ClientConfig::default()));
    }
}
