//! The `/support-bot` endpoint: keyword-driven help for jobs and classifieds.

use axum::{Json, extract::State};
use tracing::{error, info, instrument};

use crate::{
    base::{
        replies,
        types::{Res, SupportContext, SupportReply, SupportRequest},
    },
    runtime::Runtime,
    service::notifier::{IssueNotifier, IssueReport},
};

/// Phrases that mark a message as a technical complaint rather than a how-to question.
const ISSUE_TRIGGERS: [&str; 14] = [
    "not loading",
    "spinner",
    "crash",
    "error",
    "404",
    "500",
    "502",
    "cannot connect",
    "connection problem",
    "network issue",
    "link not working",
    "broken link",
    "app froze",
    "white screen",
];

/// Whether the message reads like a technical or environment problem.
///
/// Case-insensitive substring match against [`ISSUE_TRIGGERS`].
pub fn looks_like_environment_issue(message: &str) -> bool {
    let lower = message.to_lowercase();
    ISSUE_TRIGGERS.iter().any(|trigger| lower.contains(trigger))
}

/// Help text for the jobs section. First matching rule wins.
pub fn build_jobs_help(message: &str) -> SupportReply {
    let lower = message.to_lowercase();

    if lower.contains("post") && lower.contains("job") {
        return SupportReply::new(replies::JOBS_POST).with_follow_ups(&replies::JOBS_POST_FOLLOW_UPS);
    }

    if lower.contains("edit") || lower.contains("update") {
        return SupportReply::new(replies::JOBS_EDIT);
    }

    if lower.contains("delete") || lower.contains("remove") {
        return SupportReply::new(replies::JOBS_REMOVE);
    }

    SupportReply::new(replies::JOBS_MENU)
}

/// Help text for the classifieds section. First matching rule wins.
pub fn build_classifieds_help(message: &str) -> SupportReply {
    let lower = message.to_lowercase();

    if lower.contains("post") && ["item", "equipment", "tool", "tools"].iter().any(|word| lower.contains(word)) {
        return SupportReply::new(replies::CLASSIFIEDS_POST).with_follow_ups(&replies::CLASSIFIEDS_POST_FOLLOW_UPS);
    }

    if lower.contains("mark") && lower.contains("sold") {
        return SupportReply::new(replies::CLASSIFIEDS_MARK_SOLD);
    }

    SupportReply::new(replies::CLASSIFIEDS_MENU)
}

/// Classify the request and build the reply.
///
/// Technical complaints are queued for the support inbox and acknowledged;
/// everything else gets the help text for its context.
#[instrument(skip_all)]
pub fn handle_support_message(request: &SupportRequest, notifier: &IssueNotifier) -> Res<SupportReply> {
    if looks_like_environment_issue(&request.message) {
        info!("Technical issue reported in `{}`, scheduling notification ...", request.context);

        notifier.schedule(IssueReport::from(request))?;

        return Ok(SupportReply::issue(replies::ISSUE_ACKNOWLEDGED));
    }

    let reply = match request.context {
        SupportContext::Jobs => build_jobs_help(&request.message),
        SupportContext::Classifieds => build_classifieds_help(&request.message),
    };

    Ok(reply)
}

/// Maps the outcome of [`handle_support_message`] onto what the caller sees.
///
/// Failures are logged and replaced with a generic apology; the caller never sees the error.
pub fn reply_or_apology(result: Res<SupportReply>) -> SupportReply {
    match result {
        Ok(reply) => reply,
        Err(err) => {
            error!("Error while handling support message: {}", err);
            SupportReply::issue(replies::INTERNAL_FAILURE)
        }
    }
}

/// `POST /support-bot`.
#[instrument(skip_all)]
pub async fn support_bot(State(runtime): State<Runtime>, Json(request): Json<SupportRequest>) -> Json<SupportReply> {
    Json(reply_or_apology(handle_support_message(&request, &runtime.notifier)))
}

// Tests.

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn request(context: SupportContext, message: &str) -> SupportRequest {
        SupportRequest {
            user_id: Some("user-1".to_string()),
            message: message.to_string(),
            context,
        }
    }

    fn notifier() -> (IssueNotifier, mpsc::UnboundedReceiver<IssueReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (IssueNotifier::new(tx), rx)
    }

    #[test]
    fn test_every_trigger_is_detected_case_insensitively() {
        for trigger in ISSUE_TRIGGERS {
            assert!(looks_like_environment_issue(&format!("Hey, {} here", trigger.to_uppercase())), "{trigger}");
        }

        assert!(looks_like_environment_issue("My app keeps CRASHing"));
        assert!(looks_like_environment_issue("got a 502 again"));
    }

    #[test]
    fn test_plain_questions_are_not_issues() {
        assert!(!looks_like_environment_issue("How do I post a job?"));
        assert!(!looks_like_environment_issue("mark my drill as sold"));
        assert!(!looks_like_environment_issue(""));
    }

    #[test]
    fn test_classifier_is_pure() {
        let message = "The page shows a white screen";
        assert_eq!(looks_like_environment_issue(message), looks_like_environment_issue(message));
    }

    #[test]
    fn test_jobs_post_has_two_follow_ups() {
        let reply = build_jobs_help("How do I post a job?");

        assert_eq!(reply.reply, replies::JOBS_POST);
        assert_eq!(reply.follow_up_questions.as_ref().map(Vec::len), Some(2));
        assert!(!reply.issue_reported);
    }

    #[test]
    fn test_jobs_edit_has_no_follow_ups() {
        let reply = build_jobs_help("I want to edit my listing");

        assert_eq!(reply.reply, replies::JOBS_EDIT);
        assert_eq!(reply.follow_up_questions, None);
    }

    #[test]
    fn test_jobs_rules_are_ordered() {
        // "post" + "job" wins over "update".
        assert_eq!(build_jobs_help("update: want to post a job").reply, replies::JOBS_POST);
        // "update" wins over "remove".
        assert_eq!(build_jobs_help("Update or remove?").reply, replies::JOBS_EDIT);
        assert_eq!(build_jobs_help("please REMOVE it").reply, replies::JOBS_REMOVE);
        assert_eq!(build_jobs_help("delete").reply, replies::JOBS_REMOVE);
    }

    #[test]
    fn test_jobs_matching_is_substring_based() {
        // "job" inside "jobsite" and "post" inside "poster" still match.
        assert_eq!(build_jobs_help("poster for the jobsite").reply, replies::JOBS_POST);
    }

    #[test]
    fn test_jobs_fallback_is_menu() {
        assert_eq!(build_jobs_help("hello there"), SupportReply::new(replies::JOBS_MENU));
    }

    #[test]
    fn test_classifieds_post_tools_has_two_follow_ups() {
        let reply = build_classifieds_help("how do I post my tools");

        assert_eq!(reply.reply, replies::CLASSIFIEDS_POST);
        assert_eq!(
            reply.follow_up_questions,
            Some(replies::CLASSIFIEDS_POST_FOLLOW_UPS.iter().map(|q| q.to_string()).collect())
        );
    }

    #[test]
    fn test_classifieds_post_requires_an_item_word() {
        assert_eq!(build_classifieds_help("Post some Equipment").reply, replies::CLASSIFIEDS_POST);
        assert_eq!(build_classifieds_help("post a photo").reply, replies::CLASSIFIEDS_MENU);
    }

    #[test]
    fn test_classifieds_mark_sold() {
        let reply = build_classifieds_help("mark my drill as sold");

        assert_eq!(reply.reply, replies::CLASSIFIEDS_MARK_SOLD);
        assert_eq!(reply.follow_up_questions, None);
    }

    #[test]
    fn test_classifieds_fallback_is_menu() {
        assert_eq!(build_classifieds_help("what can you do"), SupportReply::new(replies::CLASSIFIEDS_MENU));
    }

    #[test]
    fn test_issue_schedules_notification() {
        let (notifier, mut rx) = notifier();
        let request = request(SupportContext::Jobs, "Job board is not loading, just a spinner");

        let reply = handle_support_message(&request, &notifier).unwrap();

        assert!(reply.issue_reported);
        assert_eq!(reply.reply, replies::ISSUE_ACKNOWLEDGED);
        assert_eq!(reply.follow_up_questions, None);

        let report = rx.try_recv().unwrap();
        assert_eq!(report.context, SupportContext::Jobs);
        assert_eq!(report.user_id.as_deref(), Some("user-1"));
        assert_eq!(report.message, request.message);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_issue_check_runs_before_help_rules() {
        let (notifier, mut rx) = notifier();

        let reply = handle_support_message(&request(SupportContext::Classifieds, "error when I post my tools"), &notifier).unwrap();

        assert!(reply.issue_reported);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_how_to_question_does_not_schedule() {
        let (notifier, mut rx) = notifier();

        let reply = handle_support_message(&request(SupportContext::Classifieds, "mark my drill as sold"), &notifier).unwrap();

        assert_eq!(reply.reply, replies::CLASSIFIEDS_MARK_SOLD);
        assert!(!reply.issue_reported);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_failure_maps_to_apology() {
        let (notifier, rx) = notifier();
        drop(rx);

        let reply = reply_or_apology(handle_support_message(&request(SupportContext::Jobs, "app froze"), &notifier));

        assert!(reply.issue_reported);
        assert_eq!(reply.reply, replies::INTERNAL_FAILURE);
        assert_eq!(reply.name, replies::BOT_NAME);
    }

    #[test]
    fn test_success_passes_through() {
        let reply = SupportReply::new(replies::JOBS_MENU);

        assert_eq!(reply_or_apology(Ok(reply.clone())), reply);
    }
}
