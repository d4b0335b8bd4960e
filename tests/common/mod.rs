#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard};

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use skillplus::prelude::*;

pub const PASSWORD: &str = "secret";

/// A request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub form: Vec<FormPart>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn parts(&self) -> Vec<FormPart> {
        self.form.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub filename: Option<String>,
    pub data: Vec<u8>,
}

impl FormPart {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

#[derive(Debug, Default)]
pub struct MockState {
    pub users: Vec<User>,
    pub passwords: HashMap<String, String>,
    pub tokens: HashMap<String, Id>,
    pub posts: Vec<Post>,
    pub plans: Vec<LearningPlan>,
    pub follow_requests: Vec<FollowRequest>,
    pub counts: FollowCounts,
    pub statuses: Vec<Status>,
    pub comments: HashMap<Id, Vec<Comment>>,
    pub requests: Vec<Recorded>,
    /// "METHOD /path" -> (status, message) answered instead of the real route.
    pub failures: HashMap<String, (u16, String)>,
    next_id: Id,
}

fn user(id: Id, name: &str) -> User {
    User {
        id,
        username: name.to_string(),
        email: format!("{name}@example.com"),
        profile_image: None,
    }
}

impl MockState {
    fn seeded() -> Self {
        let mut state = MockState {
            next_id: 100,
            counts: FollowCounts { followers: 3, following: 1 },
            ..MockState::default()
        };
        for (id, name) in [(1, "ada"), (2, "bob"), (3, "carol")] {
            state.users.push(user(id, name));
            state.passwords.insert(format!("{name}@example.com"), PASSWORD.to_string());
        }
        state.follow_requests.push(FollowRequest {
            id: 10,
            follower: user(2, "bob"),
            status: FollowStatus::Pending,
        });
        state.follow_requests.push(FollowRequest {
            id: 11,
            follower: user(3, "carol"),
            status: FollowStatus::Pending,
        });
        state
    }

    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }

    fn issue_token(&mut self, user_id: Id) -> String {
        let token = format!("token-{user_id}-{}", self.next_id());
        self.tokens.insert(token.clone(), user_id);
        token
    }

    fn caller(&self, req: &HttpRequest) -> Option<User> {
        let header = req.headers().get("authorization")?.to_str().ok()?;
        let token = header.strip_prefix("Bearer ")?;
        let id = self.tokens.get(token)?;
        self.users.iter().find(|u| u.id == *id).cloned()
    }

    pub fn fail(&mut self, route: &str, status: u16, message: &str) {
        self.failures.insert(route.to_string(), (status, message.to_string()));
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }
}

pub struct MockBackend {
    pub addr: SocketAddr,
    state: web::Data<Mutex<MockState>>,
}

impl MockBackend {
    /// Binds an ephemeral port; must run inside an actix system.
    pub async fn start() -> Self {
        let state = web::Data::new(Mutex::new(MockState::seeded()));
        let data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::route().to(handle_all))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind mock backend");
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        MockBackend { addr, state }
    }

    pub fn config(&self) -> Config {
        Config::for_origin(&format!("http://{}", self.addr)).unwrap()
    }

    pub fn api(&self, session: Session) -> ApiClient {
        ApiClient::new(self.config(), session)
    }

    /// Client already holding a valid token for `ada`.
    pub fn signed_in(&self) -> ApiClient {
        let token = self.state().issue_token(1);
        self.api(Session::with_token(token))
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }
}

fn respond(status: u16, body: Value) -> HttpResponse {
    HttpResponse::build(StatusCode::from_u16(status).unwrap()).json(body)
}

fn message(status: u16, text: &str) -> HttpResponse {
    respond(status, json!({ "message": text }))
}

fn id_after(path: &str, prefix: &str) -> Option<Id> {
    path.strip_prefix(prefix)?.parse().ok()
}

fn upload_path(part: &FormPart) -> String {
    format!("/uploads/{}", part.filename.as_deref().unwrap_or("blob"))
}

async fn handle_all(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<Mutex<MockState>>,
) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let content_type = header("content-type");
    let form = read_parts(content_type.as_deref(), body.clone()).await;
    let recorded = Recorded {
        method: req.method().as_str().to_string(),
        path: req.path().to_string(),
        authorization: header("authorization"),
        content_type,
        body: body.to_vec(),
        form,
    };

    let mut state = state.lock().unwrap();
    state.requests.push(recorded.clone());

    let Some(path) = req.path().strip_prefix("/api") else {
        return message(404, "No route found");
    };
    let method = req.method().as_str();
    if let Some((status, text)) = state.failures.get(&format!("{method} {path}")).cloned() {
        return message(status, &text);
    }

    match (method, path) {
        ("POST", "/auth/signin") => {
            let body = recorded.json();
            let email = body["email"].as_str().unwrap_or_default();
            let password = body["password"].as_str().unwrap_or_default();
            let known = state.passwords.get(email).is_some_and(|p| p == password);
            let user_id = state.users.iter().find(|u| u.email == email).map(|u| u.id);
            match user_id {
                Some(id) if known => {
                    let token = state.issue_token(id);
                    respond(200, json!({ "token": token }))
                }
                _ => message(401, "Invalid email or password"),
            }
        }
        ("POST", "/auth/signup-with-image") => {
            let parts = recorded.parts();
            let field = |name: &str| parts.iter().find(|p| p.name == name).map(FormPart::text);
            let (Some(username), Some(email), Some(password)) =
                (field("username"), field("email"), field("password"))
            else {
                return message(400, "Missing fields");
            };
            if state.passwords.contains_key(&email) {
                return message(409, "Email already registered");
            }
            let id = state.next_id();
            let profile_image = parts.iter().find(|p| p.name == "file").map(upload_path);
            state.users.push(User { id, username, email: email.clone(), profile_image });
            state.passwords.insert(email, password);
            let token = state.issue_token(id);
            respond(200, json!({ "token": token }))
        }
        _ => {
            let Some(me) = state.caller(&req) else {
                return HttpResponse::Unauthorized().finish();
            };
            route_authorized(&mut state, me, method, path, &recorded)
        }
    }
}

fn route_authorized(state: &mut MockState, me: User, method: &str, path: &str, req: &Recorded) -> HttpResponse {
    match (method, path) {
        ("GET", "/users/me") => respond(200, json!(me)),
        ("GET", "/users/all") => respond(200, json!(state.users)),

        ("GET", "/posts/my") => {
            let mine: Vec<&Post> = state
                .posts
                .iter()
                .filter(|p| p.user.as_ref().map(|u| u.id) == Some(me.id))
                .collect();
            respond(200, json!(mine))
        }
        ("POST", "/posts") => {
            let parts = req.parts();
            let text = |name: &str| parts.iter().find(|p| p.name == name).map(FormPart::text);
            let id = state.next_id();
            state.posts.push(Post {
                id,
                title: text("title").unwrap_or_default(),
                description: text("description").unwrap_or_default(),
                media_paths: parts.iter().filter(|p| p.name == "files").map(upload_path).collect(),
                user: Some(me),
            });
            respond(200, json!({ "id": id }))
        }
        ("GET", p) if p.starts_with("/posts/") => {
            let id = id_after(p, "/posts/");
            match state.posts.iter().find(|post| Some(post.id) == id) {
                Some(post) => respond(200, json!(post)),
                None => message(404, "Post not found"),
            }
        }
        ("PUT", p) if p.starts_with("/posts/") => {
            let parts = req.parts();
            let text = |name: &str| parts.iter().find(|p| p.name == name).map(FormPart::text);
            let id = id_after(p, "/posts/");
            let Some(post) = state.posts.iter_mut().find(|post| Some(post.id) == id) else {
                return message(404, "Post not found");
            };
            if let Some(title) = text("title") {
                post.title = title;
            }
            if let Some(description) = text("description") {
                post.description = description;
            }
            post.media_paths
                .extend(parts.iter().filter(|p| p.name == "files").map(upload_path));
            respond(200, json!(post))
        }
        ("DELETE", p) if p.starts_with("/posts/") => {
            let id = id_after(p, "/posts/");
            state.posts.retain(|post| Some(post.id) != id);
            respond(200, json!({}))
        }

        ("GET", "/learning-plans/my") => respond(200, json!(state.plans)),
        ("POST", "/learning-plans") => {
            let Ok(mut plan) = serde_json::from_slice::<LearningPlan>(&req.body) else {
                return message(400, "Malformed learning plan");
            };
            match plan.id {
                Some(id) => match state.plans.iter_mut().find(|p| p.id == Some(id)) {
                    Some(existing) => *existing = plan,
                    None => return message(404, "Learning plan not found"),
                },
                None => {
                    plan.id = Some(state.next_id());
                    state.plans.push(plan);
                }
            }
            respond(200, json!({}))
        }
        ("DELETE", p) if p.starts_with("/learning-plans/") => {
            let id = id_after(p, "/learning-plans/");
            state.plans.retain(|plan| plan.id != id);
            respond(200, json!({}))
        }

        ("GET", "/follow/counts") => respond(200, json!(state.counts)),
        ("GET", "/follow/requests") => respond(200, json!(state.follow_requests)),
        ("POST", p) if p.starts_with("/follow/accept/") => {
            let id = id_after(p, "/follow/accept/");
            state.follow_requests.retain(|r| Some(r.id) != id);
            state.counts.followers += 1;
            respond(200, json!({}))
        }

        ("GET", "/status") => respond(200, json!(state.statuses)),
        ("POST", "/status") => {
            let Some(file) = req.parts().into_iter().find(|p| p.name == "file") else {
                return message(400, "No file");
            };
            let id = state.next_id();
            state.statuses.push(Status {
                id,
                media_path: Some(upload_path(&file)),
                created_at: None,
                expires_at: None,
                user: Some(me),
            });
            respond(200, json!({}))
        }
        ("DELETE", p) if p.starts_with("/status/") => {
            let id = id_after(p, "/status/");
            state.statuses.retain(|s| Some(s.id) != id);
            respond(200, json!({}))
        }

        ("GET", p) if p.starts_with("/comments/") => {
            let id = id_after(p, "/comments/").unwrap_or_default();
            respond(200, json!(state.comments.get(&id).cloned().unwrap_or_default()))
        }
        ("POST", p) if p.starts_with("/comments/") => {
            let Some(post_id) = id_after(p, "/comments/") else {
                return message(404, "Post not found");
            };
            let comment = Comment {
                id: state.next_id(),
                content: req.json()["content"].as_str().unwrap_or_default().to_string(),
                user: Some(me),
                created_at: None,
            };
            state.comments.entry(post_id).or_default().push(comment.clone());
            respond(200, json!(comment))
        }
        ("PUT", p) if p.starts_with("/comments/") => {
            let id = id_after(p, "/comments/");
            let content = req.json()["content"].as_str().unwrap_or_default().to_string();
            let found = state.comments.values_mut().flatten().find(|c| Some(c.id) == id);
            match found {
                Some(c) if c.user.as_ref().map(|u| u.id) == Some(me.id) => {
                    c.content = content;
                    respond(200, json!(c))
                }
                Some(_) => message(403, "You can only edit your own comments"),
                None => message(404, "Comment not found"),
            }
        }
        ("DELETE", p) if p.starts_with("/comments/") => {
            let id = id_after(p, "/comments/");
            for list in state.comments.values_mut() {
                list.retain(|c| Some(c.id) != id);
            }
            respond(200, json!({}))
        }

        _ => message(404, "No route found"),
    }
}

async fn read_parts(content_type: Option<&str>, body: web::Bytes) -> Vec<FormPart> {
    let Some(boundary) = content_type.and_then(|ct| multer::parse_boundary(ct).ok()) else {
        return Vec::new();
    };
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let Ok(data) = field.bytes().await else {
            break;
        };
        parts.push(FormPart { name, filename, data: data.to_vec() });
    }
    parts
}
