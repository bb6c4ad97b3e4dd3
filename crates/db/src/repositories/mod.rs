//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod badge_repo;
pub mod discussion_repo;
pub mod donation_repo;
pub mod poll_repo;
pub mod proposal_repo;
pub mod quest_repo;
pub mod reaction_repo;
pub mod reward_repo;
pub mod session_repo;
pub mod user_repo;

pub use badge_repo::BadgeRepo;
pub use discussion_repo::DiscussionRepo;
pub use donation_repo::DonationRepo;
pub use poll_repo::PollRepo;
pub use proposal_repo::ProposalRepo;
pub use quest_repo::QuestRepo;
pub use reaction_repo::ReactionRepo;
pub use reward_repo::RewardRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
