//! Page templates and the view models they render
//!
//! Templates live in `templates/`; every page template carries a
//! `PageContext` for the navbar and flash messages of `base.html`.

use std::collections::HashSet;

use askama::Template;
use axum::response::Html;

use super::error::AppError;
use crate::auth::{Flash, Session};
use crate::db::{MessageWithAuthor, User, UserStats};
use crate::forms::{EditProfileForm, FormErrors};
use crate::models::Paginated;

/// Render a template into an HTML response body.
pub fn render<T: Template>(template: T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// Logged-in user as shown in the navbar
#[derive(Debug, Clone)]
pub struct NavUser {
    pub id: i32,
    pub username: String,
    pub image_url: String,
}

/// Navbar state and pending flashes, shared by every page
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub current_user: Option<NavUser>,
    pub flashes: Vec<Flash>,
}

impl PageContext {
    /// Consumes the session's flash messages.
    pub fn new(session: &Session, user: Option<&User>) -> Self {
        Self {
            current_user: user.map(|u| NavUser {
                id: u.id,
                username: u.username.clone(),
                image_url: u.image_url.clone(),
            }),
            flashes: session.take_flashes(),
        }
    }
}

/// How the viewer relates to a user shown on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Anonymous,
    Me,
    Following,
    NotFollowing,
}

/// A user as shown in cards and profile headers
#[derive(Debug, Clone)]
pub struct UserCard {
    pub id: i32,
    pub username: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: String,
    pub location: String,
    pub relation: Relation,
}

impl UserCard {
    pub fn new(user: &User, viewer: Option<&User>, following: &HashSet<i32>) -> Self {
        let relation = match viewer {
            None => Relation::Anonymous,
            Some(v) if v.id == user.id => Relation::Me,
            Some(_) if following.contains(&user.id) => Relation::Following,
            Some(_) => Relation::NotFollowing,
        };

        Self {
            id: user.id,
            username: user.username.clone(),
            image_url: user.image_url.clone(),
            header_image_url: user.header_image_url.clone(),
            bio: user.bio.clone().unwrap_or_default(),
            location: user.location.clone().unwrap_or_default(),
            relation,
        }
    }

    pub fn is_me(&self) -> bool {
        self.relation == Relation::Me
    }

    pub fn is_followed(&self) -> bool {
        self.relation == Relation::Following
    }

    pub fn can_follow(&self) -> bool {
        self.relation == Relation::NotFollowing
    }
}

/// A message with its author and the viewer's like state
#[derive(Debug, Clone)]
pub struct MessageView {
    pub id: i32,
    pub text: String,
    pub date: String,
    pub user_id: i32,
    pub username: String,
    pub image_url: String,
    pub liked: bool,
    /// Logged in and not the author
    pub likeable: bool,
}

impl MessageView {
    pub fn new(message: &MessageWithAuthor, viewer: Option<&User>, liked: &HashSet<i32>) -> Self {
        Self {
            id: message.id,
            text: message.text.clone(),
            date: message.timestamp.format("%d %B %Y").to_string(),
            user_id: message.user_id,
            username: message.username.clone(),
            image_url: message.image_url.clone(),
            liked: liked.contains(&message.id),
            likeable: viewer.is_some_and(|v| v.id != message.user_id),
        }
    }

    pub fn all(messages: &[MessageWithAuthor], viewer: Option<&User>, liked: &HashSet<i32>) -> Vec<Self> {
        messages.iter().map(|m| Self::new(m, viewer, liked)).collect()
    }
}

/// Profile header: the user plus counters
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub user: UserCard,
    pub stats: UserStats,
}

/// Previous/next links for paginated pages
#[derive(Debug, Clone, Default)]
pub struct Pager {
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: u32,
    pub next_page: u32,
    /// Extra query string carried across pages, e.g. `&q=bob`
    pub suffix: String,
}

impl Pager {
    pub fn new<T>(page: &Paginated<T>, search: Option<&str>) -> Self {
        Self {
            has_prev: page.has_prev(),
            has_next: page.has_next(),
            prev_page: page.page.saturating_sub(1).max(1),
            next_page: page.page.saturating_add(1),
            suffix: search
                .map(|q| format!("&q={}", urlencoding::encode(q)))
                .unwrap_or_default(),
        }
    }

    pub fn is_needed(&self) -> bool {
        self.has_prev || self.has_next
    }
}

#[derive(Template)]
#[template(path = "home-anon.html")]
pub struct HomeAnonTemplate {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub me: UserCard,
    pub stats: UserStats,
    pub messages: Vec<MessageView>,
    pub pager: Pager,
}

#[derive(Template)]
#[template(path = "users/signup.html")]
pub struct SignupTemplate {
    pub page: PageContext,
    pub username: String,
    pub email: String,
    pub image_url: String,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "users/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
    pub username: String,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "users/edit.html")]
pub struct EditProfileTemplate {
    pub page: PageContext,
    pub form: EditProfileForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UserIndexTemplate {
    pub page: PageContext,
    pub users: Vec<UserCard>,
    pub q: String,
    pub pager: Pager,
}

#[derive(Template)]
#[template(path = "users/show.html")]
pub struct UserShowTemplate {
    pub page: PageContext,
    pub profile: ProfileView,
    pub messages: Vec<MessageView>,
}

#[derive(Template)]
#[template(path = "users/follows.html")]
pub struct UserFollowsTemplate {
    pub page: PageContext,
    pub profile: ProfileView,
    pub heading: &'static str,
    pub users: Vec<UserCard>,
}

#[derive(Template)]
#[template(path = "users/likes.html")]
pub struct UserLikesTemplate {
    pub page: PageContext,
    pub profile: ProfileView,
    pub messages: Vec<MessageView>,
}

#[derive(Template)]
#[template(path = "messages/new.html")]
pub struct NewMessageTemplate {
    pub page: PageContext,
    pub text: String,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "messages/show.html")]
pub struct MessageShowTemplate {
    pub page: PageContext,
    pub message: MessageView,
    pub can_delete: bool,
}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

#[derive(Template)]
#[template(path = "500.html")]
pub struct ServerErrorTemplate;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::FlashCategory;
    use chrono::{TimeZone, Utc};

    fn user(id: i32, username: &str) -> User {
        User {
            id,
            email: format!("{username}@test.com"),
            username: username.into(),
            image_url: "/static/images/default-pic.svg".into(),
            header_image_url: "/static/images/warbler-hero.svg".into(),
            bio: None,
            location: None,
            password: String::new(),
        }
    }

    fn message(id: i32, author: &User) -> MessageWithAuthor {
        MessageWithAuthor {
            id,
            text: "A message from user 1".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap(),
            user_id: author.id,
            username: author.username.clone(),
            image_url: author.image_url.clone(),
        }
    }

    fn logged_in(u: &User) -> PageContext {
        PageContext {
            current_user: Some(NavUser {
                id: u.id,
                username: u.username.clone(),
                image_url: u.image_url.clone(),
            }),
            flashes: vec![],
        }
    }

    #[test]
    fn relation_to_viewer() {
        let me = user(1, "me");
        let other = user(2, "other");
        let following: HashSet<i32> = [2].into_iter().collect();

        assert_eq!(UserCard::new(&other, None, &following).relation, Relation::Anonymous);
        assert!(UserCard::new(&me, Some(&me), &following).is_me());
        assert!(UserCard::new(&other, Some(&me), &following).is_followed());
        assert!(UserCard::new(&other, Some(&me), &HashSet::new()).can_follow());
    }

    #[test]
    fn message_like_state() {
        let author = user(1, "author");
        let viewer = user(2, "viewer");
        let msg = message(9, &author);
        let liked: HashSet<i32> = [9].into_iter().collect();

        let view = MessageView::new(&msg, Some(&viewer), &liked);
        assert!(view.liked);
        assert!(view.likeable);
        assert_eq!(view.date, "09 March 2026");

        assert!(!MessageView::new(&msg, Some(&author), &liked).likeable);
        assert!(!MessageView::new(&msg, None, &liked).likeable);
    }

    #[test]
    fn pager_carries_search() {
        let page: Paginated<()> = Paginated {
            items: vec![],
            total: 45,
            page: 2,
            per_page: 20,
        };
        let pager = Pager::new(&page, Some("test user"));
        assert!(pager.has_prev && pager.has_next);
        assert_eq!(pager.prev_page, 1);
        assert_eq!(pager.next_page, 3);
        assert_eq!(pager.suffix, "&q=test%20user");
    }

    #[test]
    fn pager_on_last_possible_page() {
        let page: Paginated<()> = Paginated {
            items: vec![],
            total: 3,
            page: u32::MAX,
            per_page: 24,
        };
        let pager = Pager::new(&page, None);
        assert!(!pager.has_next);
        assert_eq!(pager.next_page, u32::MAX);
        assert_eq!(pager.prev_page, u32::MAX - 1);
    }

    #[test]
    fn anonymous_layout_links() {
        let html = HomeAnonTemplate {
            page: PageContext::default(),
        }
        .render()
        .unwrap();
        assert!(html.contains(r#"<li><a href="/signup">Sign up</a></li>"#));
        assert!(html.contains(r#"<li><a href="/login">Log in</a></li>"#));
        assert!(html.contains("<h4>New to Warbler?</h4>"));
        assert!(!html.contains("Log out"));
    }

    #[test]
    fn flashes_render_with_category() {
        let page = PageContext {
            current_user: None,
            flashes: vec![Flash {
                category: FlashCategory::Danger,
                message: "Access unauthorized.".into(),
            }],
        };
        let html = HomeAnonTemplate { page }.render().unwrap();
        assert!(html.contains(r#"<div class="alert alert-danger">Access unauthorized.</div>"#));
    }

    #[test]
    fn signup_form_inputs() {
        let html = SignupTemplate {
            page: PageContext::default(),
            username: String::new(),
            email: String::new(),
            image_url: String::new(),
            errors: FormErrors::new(),
        }
        .render()
        .unwrap();
        assert!(html.contains(
            r#"<input class="form-control" id="username" name="username" placeholder="Username" required type="text" value="">"#
        ));
        assert!(html.contains(r#"<h2 class="join-message">Join Warbler today.</h2>"#));
    }

    #[test]
    fn signup_form_echoes_escaped_values() {
        let errors = crate::forms::UserAddForm {
            username: "<b>bob</b>".into(),
            email: "bad".into(),
            password: "pw".into(),
            image_url: String::new(),
        }
        .validate()
        .unwrap_err();

        let html = SignupTemplate {
            page: PageContext::default(),
            username: "<b>bob</b>".into(),
            email: "bad".into(),
            image_url: String::new(),
            errors,
        }
        .render()
        .unwrap();
        assert!(html.contains("&lt;b&gt;bob"));
        assert!(!html.contains("<b>bob"));
        assert!(html.contains("Invalid email address."));
        assert!(html.contains("Field must be at least 6 characters long."));
    }

    #[test]
    fn timeline_stars() {
        let me = user(3, "yetanothertester");
        let author = user(1, "testcaseuser");
        let liked: HashSet<i32> = [9].into_iter().collect();
        let messages = vec![message(9, &author), message(10, &author)];

        let html = HomeTemplate {
            page: logged_in(&me),
            me: UserCard::new(&me, Some(&me), &HashSet::new()),
            stats: UserStats::default(),
            messages: MessageView::all(&messages, Some(&me), &liked),
            pager: Pager::default(),
        }
        .render()
        .unwrap();

        assert!(html.contains("<p>@yetanothertester</p>"));
        assert!(html.contains(r#"action="/users/remove_like/9""#));
        assert!(html.contains(r#"<i class="fas fa-star" style="color: #ffff00;"></i>"#));
        assert!(html.contains(r#"action="/users/add_like/10""#));
        assert!(html.contains("New Message"));
        assert!(html.contains("Log out"));
    }

    #[test]
    fn directory_buttons_depend_on_login() {
        let me = user(1, "me");
        let other = user(2, "anothertester");

        let anonymous = UserIndexTemplate {
            page: PageContext::default(),
            users: vec![UserCard::new(&other, None, &HashSet::new())],
            q: String::new(),
            pager: Pager::default(),
        }
        .render()
        .unwrap();
        assert!(anonymous.contains("@anothertester"));
        assert!(!anonymous.contains("Follow"));

        let viewer = UserIndexTemplate {
            page: logged_in(&me),
            users: vec![UserCard::new(&other, Some(&me), &HashSet::new())],
            q: String::new(),
            pager: Pager::default(),
        }
        .render()
        .unwrap();
        assert!(viewer.contains(r#"action="/users/follow/2""#));
        assert!(viewer.contains("Follow"));
    }

    #[test]
    fn profile_header_buttons() {
        let me = user(1, "testcaseuser");
        let other = user(3, "yetanothertester");

        let html = UserShowTemplate {
            page: logged_in(&me),
            profile: ProfileView {
                user: UserCard::new(&other, Some(&me), &HashSet::new()),
                stats: UserStats::default(),
            },
            messages: vec![],
        }
        .render()
        .unwrap();
        assert!(html.contains("@yetanothertester"));
        assert!(html.contains(r#"<button class="btn btn-outline-primary">Follow</button>"#));

        let own = UserShowTemplate {
            page: logged_in(&me),
            profile: ProfileView {
                user: UserCard::new(&me, Some(&me), &HashSet::new()),
                stats: UserStats::default(),
            },
            messages: vec![],
        }
        .render()
        .unwrap();
        assert!(own.contains(r#"href="/users/profile""#));
        assert!(own.contains(r#"action="/users/delete""#));
        assert!(!own.contains(r#"<button class="btn btn-outline-primary">Follow</button>"#));
    }

    #[test]
    fn edit_profile_heading() {
        let html = EditProfileTemplate {
            page: PageContext::default(),
            form: EditProfileForm::default(),
            errors: FormErrors::new(),
        }
        .render()
        .unwrap();
        assert!(html.contains(r#"<h2 class="join-message">Edit Your Profile.</h2>"#));
        assert!(html.contains(
            r#"<input class="form-control" id="username" name="username" placeholder="Username:" required type="text" value="">"#
        ));
    }
}
