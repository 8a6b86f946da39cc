use thiserror::Error;

/// Errors caused by user input or by racing against another moderator.
///
/// Every variant's display text is posted back into the channel the offending
/// message came from, so the wording is written for end users.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GateError {
    /// Help requested in a guild channel by someone without Manage Messages.
    #[error("The help command should be executed in private chat")]
    HelpOutsidePrivateChat,

    /// Channel-setting follow-up did not mention a channel.
    #[error("A channel needs to be mentioned.")]
    NeedChannelMention,

    /// No guild role matched the supplied name.
    #[error("Couldn't find any roles with that name.")]
    RoleNotFound,

    /// More than one guild role matched the supplied name.
    #[error("More than 1 match, please rename the role temporarily.")]
    AmbiguousRole,

    /// Input was expected to be a non-negative number.
    #[error("\"{0}\" is not a valid number.")]
    InvalidNumber(String),

    /// A list index outside of the presented list.
    #[error("There is no entry with number {0}.")]
    NoSuchEntry(usize),

    /// Welcome image must be an absolute http(s) URL.
    #[error("\"{0}\" is not a valid image url, it needs to start with http:// or https://.")]
    InvalidImageUrl(String),

    /// Argument was expected to be a Discord user id.
    #[error("\"{0}\" is not a valid user id.")]
    InvalidUserId(String),

    /// Command was invoked without its required arguments.
    ///
    /// # Fields
    /// - Expected syntax of the command
    #[error("Missing arguments, expected: {0}")]
    MissingArguments(String),

    /// Word filter method not recognised.
    #[error("\"{0}\" is not a filter method, use one of EXACT, CONTAINS, STARTS_WITH or ENDS_WITH.")]
    UnknownFilterMethod(String),

    /// Review requested for a user without a stored answer.
    #[error("The user you tried to review is not currently in the manual review list.")]
    NotInReviewQueue,

    /// Stored answer exists but both the question and answer are blank.
    #[error("The user you tried to review is still in the list, but another moderator already declared the question wrong or the user rejoined.")]
    ReviewInconsistent,

    /// Stored answer vanished between opening a review and acting on it.
    #[error("The user is no longer in the queue; another moderator may have reviewed it already.")]
    NoLongerInQueue,

    /// Review input was neither a known keyword nor reaction.
    #[error("Expecting one of the previously mentioned responses, but got \"{0}\" as response")]
    UnexpectedReviewResponse(String),
}
