use serde::Serialize;

use crate::core::registry::SupportLevel;

/// Terminal classification of a mod file, driving output placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Client,
    Server,
    Both,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Client,
        Category::Server,
        Category::Both,
        Category::Unknown,
    ];

    /// Output subfolder name for this category.
    pub fn folder_name(self) -> &'static str {
        match self {
            Category::Client => "client-only",
            Category::Server => "server-only",
            Category::Both => "both",
            Category::Unknown => "unknown",
        }
    }

    /// Label used in status lines and the summary.
    pub fn label(self) -> &'static str {
        match self {
            Category::Client => "CLIENT-ONLY",
            Category::Server => "SERVER-ONLY",
            Category::Both => "BOTH (Client & Server)",
            Category::Unknown => "UNKNOWN",
        }
    }
}

/// Map the two side-support levels onto a category. First match wins:
///
/// 1. both sides wanted                          → `Both`
/// 2. client wanted, server unsupported          → `Client`
/// 3. server wanted, client unsupported          → `Server`
/// 4. client wanted, server merely unknown       → `Both`
/// 5. server wanted, client merely unknown       → `Both`
/// 6. neither side wanted                        → `Unknown`
///
/// A mod is side-exclusive only when the other side is *explicitly*
/// unsupported; a wanted side paired with an unknown one stays in
/// `Both`, so a required mod is never dropped from a side on a guess.
pub fn classify(client_side: SupportLevel, server_side: SupportLevel) -> Category {
    let client_wanted = client_side.is_wanted();
    let server_wanted = server_side.is_wanted();

    if client_wanted && server_wanted {
        Category::Both
    } else if client_wanted && server_side == SupportLevel::Unsupported {
        Category::Client
    } else if server_wanted && client_side == SupportLevel::Unsupported {
        Category::Server
    } else if client_wanted || server_wanted {
        Category::Both
    } else {
        Category::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::SupportLevel::{Optional, Required, Unknown, Unsupported};

    #[test]
    fn full_decision_table() {
        // All 16 combinations, spelled out.
        let cases = [
            ((Required, Required), Category::Both),
            ((Required, Optional), Category::Both),
            ((Required, Unsupported), Category::Client),
            ((Required, Unknown), Category::Both),
            ((Optional, Required), Category::Both),
            ((Optional, Optional), Category::Both),
            ((Optional, Unsupported), Category::Client),
            ((Optional, Unknown), Category::Both),
            ((Unsupported, Required), Category::Server),
            ((Unsupported, Optional), Category::Server),
            ((Unsupported, Unsupported), Category::Unknown),
            ((Unsupported, Unknown), Category::Unknown),
            ((Unknown, Required), Category::Both),
            ((Unknown, Optional), Category::Both),
            ((Unknown, Unsupported), Category::Unknown),
            ((Unknown, Unknown), Category::Unknown),
        ];

        for ((client, server), expected) in cases {
            assert_eq!(
                classify(client, server),
                expected,
                "({client:?}, {server:?})"
            );
        }
    }

    #[test]
    fn folder_names_match_output_layout() {
        assert_eq!(Category::Client.folder_name(), "client-only");
        assert_eq!(Category::Server.folder_name(), "server-only");
        assert_eq!(Category::Both.folder_name(), "both");
        assert_eq!(Category::Unknown.folder_name(), "unknown");
    }
}
