//! Convert a parsed configuration into the runtime configuration.

use query_engine_metadata::metadata::NamingConventions;

use crate::configuration::Configuration;
use crate::error::MakeRuntimeConfigurationError;
use crate::version1::ParsedConfiguration;

/// Validate a parsed configuration and produce the runtime `Configuration`.
///
/// Naming markers end up inside placeholder names and are compared against SQL identifiers,
/// so they are restricted to `[A-Za-z0-9_]`.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    validate_conventions(&parsed_config.conventions)?;
    if parsed_config.paging.max_limit == Some(0) {
        return Err(MakeRuntimeConfigurationError::ZeroMaxLimit);
    }

    Ok(Configuration {
        conventions: parsed_config.conventions,
        order_by: parsed_config.order_by,
        paging: parsed_config.paging,
    })
}

fn validate_conventions(
    conventions: &NamingConventions,
) -> Result<(), MakeRuntimeConfigurationError> {
    let fields = [
        ("textPrefix", &conventions.text_prefix),
        ("flagPrefix", &conventions.flag_prefix),
        ("pluralSuffix", &conventions.plural_suffix),
        ("identifierMarker", &conventions.identifier_marker),
    ];
    for (field, value) in fields {
        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(MakeRuntimeConfigurationError::InvalidConvention {
                field,
                value: value.clone(),
            });
        }
    }
    if conventions.identifier_marker.is_empty() {
        return Err(MakeRuntimeConfigurationError::EmptyIdentifierMarker);
    }
    if !conventions.text_prefix.is_empty() && conventions.text_prefix == conventions.flag_prefix {
        return Err(MakeRuntimeConfigurationError::AmbiguousPrefixes(
            conventions.text_prefix.clone(),
        ));
    }
    Ok(())
}
