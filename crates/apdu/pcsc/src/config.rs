//! Connection settings for PC/SC terminals

use pcsc::{Disposition, Protocols, ShareMode as PcscShareMode};

/// How a card connection is shared with other PC/SC clients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShareMode {
    /// No other application may talk to the card while connected
    Exclusive,
    /// Other applications may open the card too
    #[default]
    Shared,
}

impl From<ShareMode> for PcscShareMode {
    fn from(mode: ShareMode) -> Self {
        match mode {
            ShareMode::Exclusive => Self::Exclusive,
            ShareMode::Shared => Self::Shared,
        }
    }
}

/// What happens to the card when a connection is released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Release {
    /// Keep the card powered, its RF session intact
    #[default]
    Leave,
    /// Warm reset, dropping any authentication held by the reader
    Reset,
    /// Power the field down
    Unpower,
}

impl From<Release> for Disposition {
    fn from(release: Release) -> Self {
        match release {
            Release::Leave => Self::LeaveCard,
            Release::Reset => Self::ResetCard,
            Release::Unpower => Self::UnpowerCard,
        }
    }
}

/// Settings applied to every terminal opened by a [`crate::PcscDeviceManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcscConfig {
    /// Sharing mode for card connections
    pub share_mode: ShareMode,
    /// Protocols offered when connecting
    pub protocols: Protocols,
    /// Card disposition on disconnect
    pub release: Release,
}

impl Default for PcscConfig {
    fn default() -> Self {
        Self {
            share_mode: ShareMode::Shared,
            // Contactless storage cards surface as T=1 on most readers, T=0 on a few
            protocols: Protocols::ANY,
            release: Release::Leave,
        }
    }
}

impl PcscConfig {
    /// Exclusive connections, card reset on release
    pub fn exclusive() -> Self {
        Self::default()
            .with_share_mode(ShareMode::Exclusive)
            .with_release(Release::Reset)
    }

    /// Set the sharing mode
    pub const fn with_share_mode(mut self, mode: ShareMode) -> Self {
        self.share_mode = mode;
        self
    }

    /// Set the protocols offered on connect
    pub const fn with_protocols(mut self, protocols: Protocols) -> Self {
        self.protocols = protocols;
        self
    }

    /// Set the disposition applied on disconnect
    pub const fn with_release(mut self, release: Release) -> Self {
        self.release = release;
        self
    }
}
