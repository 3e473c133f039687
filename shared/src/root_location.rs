//! Conversion between the root location and consumer locations.
//!
//! The root location carries the primary consumer's path directly in its
//! own pathname and search, and the paths of all other consumers inside a
//! single reserved query parameter (see [`consumer_paths`](crate::consumer_paths)).

use serde::Deserialize;

use crate::consumer_paths::{add_consumer_path, get_consumer_path, remove_consumer_path};
use crate::location::{ConsumerId, Location};
use crate::search_params::SearchParams;

/// Configuration of the root location layout, fixed at construction.
#[derive(Clone, Debug, Deserialize)]
pub struct RootLocationOptions {
    /// Name of the reserved query parameter carrying the encoded paths of
    /// all non-primary consumers.
    pub consumer_paths_query_param_name: String,

    /// The consumer whose path occupies the root pathname and search
    /// directly. Without one, every consumer is multiplexed through the
    /// reserved parameter.
    #[serde(default)]
    pub primary_consumer_id: Option<ConsumerId>,
}

impl RootLocationOptions {
    pub fn new(consumer_paths_query_param_name: impl Into<String>) -> Self {
        Self {
            consumer_paths_query_param_name: consumer_paths_query_param_name.into(),
            primary_consumer_id: None,
        }
    }

    pub fn with_primary_consumer_id(mut self, primary_consumer_id: impl Into<ConsumerId>) -> Self {
        self.primary_consumer_id = Some(primary_consumer_id.into());
        self
    }
}

/// Converts between the root location and a single consumer's location.
///
/// Both shared-location flavors use the same implementation; the trait is
/// the seam where tests (or hosts with a different layout) substitute their
/// own transformation.
pub trait RootLocationTransformer {
    /// Extracts the consumer's path from the root location, or `None` when
    /// the root location does not encode one for this consumer.
    fn consumer_path_from_root_location(
        &self,
        root_location: &Location,
        consumer_id: &ConsumerId,
    ) -> Option<String>;

    /// Computes the root location that results from setting the consumer's
    /// location. A `None` consumer location erases the consumer's presence
    /// from the root location; this drives the destroy path.
    fn create_root_location(
        &self,
        consumer_location: Option<&Location>,
        root_location: &Location,
        consumer_id: &ConsumerId,
    ) -> Location;
}

/// The default transformer, multiplexing non-primary consumers through the
/// reserved consumer-paths query parameter.
#[derive(Clone, Debug)]
pub struct ConsumerPathsTransformer {
    options: RootLocationOptions,
}

impl ConsumerPathsTransformer {
    pub fn new(options: RootLocationOptions) -> Self {
        Self { options }
    }

    fn is_primary(&self, consumer_id: &ConsumerId) -> bool {
        self.options.primary_consumer_id.as_ref() == Some(consumer_id)
    }
}

impl RootLocationTransformer for ConsumerPathsTransformer {
    fn consumer_path_from_root_location(
        &self,
        root_location: &Location,
        consumer_id: &ConsumerId,
    ) -> Option<String> {
        let param_name = &self.options.consumer_paths_query_param_name;

        if self.is_primary(consumer_id) {
            let mut params = SearchParams::parse(&root_location.search);
            params.delete(param_name);

            Some(format!("{}{}", root_location.pathname, params.to_search()))
        } else {
            let params = SearchParams::parse(&root_location.search);
            let consumer_paths = params.get(param_name)?;

            get_consumer_path(consumer_paths, consumer_id)
        }
    }

    fn create_root_location(
        &self,
        consumer_location: Option<&Location>,
        root_location: &Location,
        consumer_id: &ConsumerId,
    ) -> Location {
        let param_name = &self.options.consumer_paths_query_param_name;

        if self.is_primary(consumer_id) {
            create_root_location_for_primary_consumer(
                root_location,
                consumer_location,
                param_name,
            )
        } else {
            create_root_location_for_other_consumer(
                root_location,
                consumer_location,
                consumer_id,
                param_name,
            )
        }
    }
}

fn create_root_location_for_primary_consumer(
    root_location: &Location,
    consumer_location: Option<&Location>,
    param_name: &str,
) -> Location {
    let all_params = SearchParams::parse(&root_location.search);
    let consumer_paths = all_params.get(param_name).map(str::to_owned);

    let pathname = consumer_location.map_or_else(|| "/".to_owned(), |l| l.pathname.clone());

    // The primary consumer's own search must never drop the other
    // consumers' encoded state.
    let search = match consumer_paths {
        Some(paths) => {
            let mut params =
                SearchParams::parse(consumer_location.map_or("", |l| l.search.as_str()));
            params.set(param_name, &paths);
            params.to_search()
        }
        None => consumer_location.map_or_else(String::new, |l| l.search.clone()),
    };

    Location {
        pathname,
        search,
        ..Default::default()
    }
}

fn create_root_location_for_other_consumer(
    root_location: &Location,
    consumer_location: Option<&Location>,
    consumer_id: &ConsumerId,
    param_name: &str,
) -> Location {
    let mut all_params = SearchParams::parse(&root_location.search);
    let consumer_paths = all_params.get(param_name).map(str::to_owned);

    let new_consumer_paths = match consumer_location {
        Some(location) => Some(add_consumer_path(
            consumer_paths.as_deref(),
            consumer_id,
            &location.path(),
        )),
        None => remove_consumer_path(consumer_paths.as_deref(), consumer_id),
    };

    match new_consumer_paths {
        Some(paths) => all_params.set(param_name, &paths),
        None => all_params.delete(param_name),
    }

    Location {
        pathname: root_location.pathname.clone(),
        search: all_params.to_search(),
        ..Default::default()
    }
}
