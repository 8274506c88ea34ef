//! Canned texts used by the support bot and the welcome dispatcher.

/// Role reported on every support reply.
pub const BOT_ROLE: &str = "bot";

/// Fixed identity of the support bot.
pub const BOT_NAME: &str = "Road Workers Connect Support Bot";

// Issue handling.

/// Reply sent when a message looks like a technical problem.
pub const ISSUE_ACKNOWLEDGED: &str = "I’m Road Workers Connect Support Bot. It looks like you’re running into a technical problem. \
We’re aware of the problem you’re having and we will address it immediately. If it continues, you can also email info@superiorllc.org.";

/// Reply sent when handling the request itself failed.
pub const INTERNAL_FAILURE: &str =
    "I’m Road Workers Connect Support Bot. Something went wrong on our side. We’re aware of the problem you’re having and we will address it immediately.";

/// Subject of the support notification email.
pub const ISSUE_EMAIL_SUBJECT: &str = "[Road Workers Connect] User-reported issue";

/// Placeholder for a support request without a user id.
pub const UNKNOWN_USER: &str = "unknown / guest";

// Jobs.

pub const JOBS_POST: &str = "To post a job, tap “Post a Job”, fill in job title, location, pay range, any required certifications, \
and shift details. When you save, your listing appears on the Job Board.";

pub const JOBS_POST_FOLLOW_UPS: [&str; 2] = [
    "Do you want help with the job title or description?",
    "Is this a short call-out or a longer-term position?",
];

pub const JOBS_EDIT: &str = "To edit a job, open your job post, choose “Edit”, adjust the details, and save. The Job Board updates automatically.";

pub const JOBS_REMOVE: &str = "To remove a job, open the post and choose “Delete”. Once removed, it will no longer appear on the Job Board.";

pub const JOBS_MENU: &str =
    "I can help you create, edit, or remove job posts. Tell me if you’re posting a new job, updating one, or taking one down.";

// Classifieds.

pub const CLASSIFIEDS_POST: &str = "To post an item for sale, tap “New Classified”, add photos, a clear title, condition, price, \
and pickup or delivery details. When you publish, it appears in the Classifieds feed.";

pub const CLASSIFIEDS_POST_FOLLOW_UPS: [&str; 2] = [
    "Are you listing tools, PPE, or heavy equipment?",
    "Do you want advice on pricing or description?",
];

pub const CLASSIFIEDS_MARK_SOLD: &str =
    "To mark an item as sold, open your classified post and tap “Mark as Sold”. Other users will see that it is no longer available.";

pub const CLASSIFIEDS_MENU: &str =
    "I can walk you through posting items for sale, editing listings, or marking them as sold. What are you trying to do?";

// Welcome.

/// Direct message sent from the moderator bot to every new user.
pub const WELCOME_MESSAGE: &str = r#####"Welcome to Road Workers Connect. This space is for road crews, contractors, and industry pros to trade jobs, gear, and good information.

Keep it professional, avoid spam, and stay focused on real work. If you need help posting jobs or items for sale, tap the Support button and the Support Bot will walk you through it.

Stay safe out there."#####;
