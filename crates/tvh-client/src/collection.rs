/// Grid limit used so a single call returns the whole collection.
pub const GRID_LIMIT: u64 = 4_294_967_295;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DvrStatus {
    Upcoming,
    Finished,
    Failed,
}

impl DvrStatus {
    pub const ALL: [DvrStatus; 3] = [Self::Upcoming, Self::Finished, Self::Failed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Finished => "finished",
            Self::Failed => "failed",
        }
    }
}

/// A named upstream collection the exporter can fetch in one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Networks,
    Muxes,
    Services,
    Channels,
    Subscriptions,
    Connections,
    Inputs,
    Dvr(DvrStatus),
    EpgEvents,
}

impl Collection {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Networks => "/api/mpegts/network/grid",
            Self::Muxes => "/api/mpegts/mux/grid",
            Self::Services => "/api/mpegts/service/grid",
            Self::Channels => "/api/channel/grid",
            Self::Subscriptions => "/api/status/subscriptions",
            Self::Connections => "/api/status/connections",
            Self::Inputs => "/api/status/inputs",
            Self::Dvr(DvrStatus::Upcoming) => "/api/dvr/entry/grid_upcoming",
            Self::Dvr(DvrStatus::Finished) => "/api/dvr/entry/grid_finished",
            Self::Dvr(DvrStatus::Failed) => "/api/dvr/entry/grid_failed",
            Self::EpgEvents => "/api/epg/events/grid",
        }
    }

    /// Status endpoints return everything; grid endpoints page unless a limit is sent.
    pub fn is_paged(&self) -> bool {
        !matches!(
            self,
            Self::Subscriptions | Self::Connections | Self::Inputs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Collection, DvrStatus};

    #[test]
    fn dvr_partitions_map_to_distinct_grids() {
        let paths = DvrStatus::ALL.map(|status| Collection::Dvr(status).path());
        assert_eq!(
            paths,
            [
                "/api/dvr/entry/grid_upcoming",
                "/api/dvr/entry/grid_finished",
                "/api/dvr/entry/grid_failed",
            ]
        );
    }

    #[test]
    fn status_endpoints_are_not_paged() {
        assert!(!Collection::Inputs.is_paged());
        assert!(!Collection::Subscriptions.is_paged());
        assert!(Collection::Channels.is_paged());
        assert!(Collection::EpgEvents.is_paged());
    }
}
