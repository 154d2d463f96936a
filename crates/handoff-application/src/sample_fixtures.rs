//! Random sample listings for UI mock-ups.

use rand::Rng;
use rand::seq::SliceRandom;

use handoff_core::config::{DEFAULT_FIXTURE_CHANNELS, FixtureSettings};
use handoff_core::conversation::{ChannelAccount, ConnectionRequest, ConversationReference};
use handoff_core::error::Result;
use handoff_core::fixture::{
    ConversationInformation, ConversationSummary, FixtureProvider, UserInformation,
};

const DEPARTMENTS: [&str; 4] = ["sales", "support", "billing", "shipping"];
const VIP_PROBABILITY: f64 = 0.2;

/// Generates listings from pseudo-random data.
///
/// Pending requestors fill the first slots so waiting customers show up in
/// the mock; the rest are invented references on the configured channels.
pub struct RandomFixtureProvider {
    settings: FixtureSettings,
}

impl RandomFixtureProvider {
    pub fn new(settings: FixtureSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    fn random_reference(&self, rng: &mut impl Rng, index: usize) -> ConversationReference {
        let channel_id = self
            .settings
            .channels
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| DEFAULT_FIXTURE_CHANNELS[0].to_string());

        ConversationReference::new(channel_id, uuid::Uuid::new_v4().to_string())
            .with_user(ChannelAccount::new(
                uuid::Uuid::new_v4().to_string(),
                format!("Customer {}", index + 1),
            ))
            .with_bot(ChannelAccount::new("handoff-bot", "Handoff Bot"))
    }
}

impl FixtureProvider for RandomFixtureProvider {
    fn sample_conversations(
        &self,
        top: usize,
        pending: &[ConnectionRequest],
    ) -> Vec<ConversationSummary> {
        let mut rng = rand::thread_rng();

        (0..top)
            .map(|index| {
                let conversation_reference = match pending.get(index) {
                    Some(request) => request.requestor.clone(),
                    None => self.random_reference(&mut rng, index),
                };
                let name = conversation_reference
                    .user
                    .as_ref()
                    .map(|user| user.name.clone())
                    .unwrap_or_else(|| format!("Customer {}", index + 1));

                ConversationSummary {
                    conversation_information: ConversationInformation {
                        messages_count: rng
                            .gen_range(self.settings.min_messages..self.settings.max_messages),
                    },
                    conversation_reference,
                    user_information: UserInformation {
                        name,
                        is_vip: rng.gen_bool(VIP_PROBABILITY),
                        department: DEPARTMENTS
                            .choose(&mut rng)
                            .copied()
                            .unwrap_or(DEPARTMENTS[0])
                            .to_string(),
                    },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(channels: &[&str]) -> RandomFixtureProvider {
        RandomFixtureProvider::new(FixtureSettings {
            channels: channels.iter().map(|c| c.to_string()).collect(),
            min_messages: 2,
            max_messages: 30,
        })
        .unwrap()
    }

    #[test]
    fn test_returns_exactly_top_entries() {
        let provider = provider(&DEFAULT_FIXTURE_CHANNELS);

        assert_eq!(provider.sample_conversations(1, &[]).len(), 1);
        assert_eq!(provider.sample_conversations(50, &[]).len(), 50);
    }

    #[test]
    fn test_values_stay_within_configuration() {
        let provider = provider(&["webchat", "teams"]);

        for summary in provider.sample_conversations(40, &[]) {
            let channel = summary.conversation_reference.channel_id.as_str();
            assert!(channel == "webchat" || channel == "teams");
            assert!((2..30).contains(&summary.conversation_information.messages_count));
            assert!(DEPARTMENTS.contains(&summary.user_information.department.as_str()));
        }
    }

    #[test]
    fn test_pending_requestors_come_first() {
        let provider = provider(&["skype"]);
        let pending = vec![ConnectionRequest::new(ConversationReference::new(
            "directline",
            "waiting-1",
        ))];

        let listing = provider.sample_conversations(3, &pending);

        assert_eq!(
            listing[0].conversation_reference.identity_key(),
            ("directline", "waiting-1")
        );
        assert_eq!(listing[1].conversation_reference.channel_id, "skype");
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let result = RandomFixtureProvider::new(FixtureSettings {
            channels: Vec::new(),
            min_messages: 2,
            max_messages: 30,
        });
        assert!(result.is_err());
    }
}
