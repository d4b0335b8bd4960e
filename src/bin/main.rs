use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use skillplus::core::notify::Level;
use skillplus::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "skillplus", about = "Skill Plus from the command line")]
struct Cli {
    /// Backend API base, e.g. http://localhost:9090/api
    #[arg(long, env = "SKILLPLUS_API_URL")]
    api_url: Option<String>,

    /// Session token printed by `signin` / `signup`
    #[arg(long, env = "SKILLPLUS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with email and password and print the session token
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and print the session token
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        /// Accept the terms and conditions
        #[arg(long)]
        agree: bool,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Print the provider login URL
    OauthUrl,
    /// Take the token out of the OAuth redirect URL
    OauthCallback { redirect_uri: String },
    /// Show the signed-in user
    Me,
    #[command(subcommand)]
    Posts(PostsCommand),
    #[command(subcommand)]
    Plans(PlansCommand),
    #[command(subcommand)]
    Follow(FollowCommand),
    /// People to follow
    Suggestions,
    #[command(subcommand)]
    Status(StatusCommand),
    #[command(subcommand)]
    Comments(CommentsCommand),
}

#[derive(Subcommand)]
enum PostsCommand {
    List,
    Show { id: Id },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long = "file")]
        files: Vec<PathBuf>,
    },
    Edit {
        id: Id,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "file")]
        files: Vec<PathBuf>,
    },
    Delete {
        id: Id,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand)]
enum PlansCommand {
    List,
    Create {
        #[arg(long)]
        title: String,
        /// Comma-separated
        #[arg(long)]
        topics: String,
        /// Comma-separated
        #[arg(long)]
        resources: String,
        /// YYYY-MM-DD, today or later
        #[arg(long)]
        target_date: String,
        #[arg(long, default_value_t = Progress::NotStarted)]
        progress: Progress,
    },
    Edit {
        id: Id,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        topics: Option<String>,
        #[arg(long)]
        resources: Option<String>,
        #[arg(long)]
        target_date: Option<String>,
        #[arg(long)]
        progress: Option<Progress>,
    },
    Delete {
        id: Id,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand)]
enum FollowCommand {
    Counts,
    Requests,
    Accept { id: Id },
}

#[derive(Subcommand)]
enum StatusCommand {
    List,
    Upload { file: PathBuf },
    Delete { id: Id },
}

#[derive(Subcommand)]
enum CommentsCommand {
    List { post_id: Id },
    Add { post_id: Id, content: String },
    Edit { id: Id, content: String },
    Delete { id: Id },
}

#[derive(Args)]
struct Confirm {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

/// Prints notifications and remembers whether any of them was an error.
#[derive(Default)]
struct ConsoleNotifier {
    failed: AtomicBool,
}

impl ConsoleNotifier {
    fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => println!("{}", notification.text),
            Level::Error => {
                self.failed.store(true, Ordering::SeqCst);
                eprintln!("error: {}", notification.text);
            }
        }
    }
}

fn confirm(question: &str, confirm: &Confirm) -> anyhow::Result<bool> {
    if confirm.yes {
        return Ok(true);
    }
    print!("{question} This action cannot be undone. [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_posts(posts: &PostsView) {
    match posts.view() {
        ViewState::Loading => {}
        ViewState::Empty { call_to_action } => println!("No posts yet. {call_to_action}."),
        ViewState::Items(items) => {
            for post in items {
                println!("#{} {} ({} media)", post.id, post.title, post.media_paths.len());
                println!("    {}", post.description);
            }
        }
    }
}

fn print_plans(plans: &LearningPlansView) {
    match plans.view() {
        ViewState::Loading => {}
        ViewState::Empty { call_to_action } => println!("No Learning Plans Yet. {call_to_action}."),
        ViewState::Items(items) => {
            for plan in items {
                println!(
                    "#{} {} [{}] due {}",
                    plan.id.unwrap_or_default(),
                    plan.title,
                    plan.progress,
                    plan.target_date
                );
                println!("    topics: {}", plan.topics.join(", "));
                println!("    resources: {}", plan.resources.join(", "));
            }
        }
    }
}

async fn run(cli: Cli, notifier: Arc<ConsoleNotifier>) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(url) = &cli.api_url {
        config = Config::new(url, config.media_host.as_str(), config.oauth_url.as_str())?;
    }
    let session = cli.token.map(Session::with_token).unwrap_or_default();
    let api = ApiClient::new(config, session.clone());
    let notes: Arc<dyn Notifier> = notifier.clone();

    match cli.command {
        Command::Signin { email, password } => {
            let flow = AuthFlow::new(api, notes);
            if flow.sign_in(&SignInForm { email, password }).await.is_some() {
                println!("{}", session.token().unwrap_or_default());
            }
        }
        Command::Signup { name, email, password, confirm_password, agree, image } => {
            let profile_image = image.map(MediaFile::from_path).transpose()?;
            let form = SignUpForm {
                full_name: name,
                email,
                password,
                confirm_password,
                agreed_to_terms: agree,
                profile_image,
            };
            let flow = AuthFlow::new(api, notes);
            if flow.sign_up(&form).await.is_some() {
                println!("{}", session.token().unwrap_or_default());
            }
        }
        Command::OauthUrl => println!("{}", AuthApi::new(api).authorize_url()),
        Command::OauthCallback { redirect_uri } => {
            let mut page = OAuthCallback::new(session.clone(), notes);
            if page.on_mount(&redirect_uri).is_some() && session.is_authenticated() {
                println!("{}", session.token().unwrap_or_default());
            }
        }
        Command::Me => {
            let me = UsersApi::new(api).me().await?;
            println!("{} <{}>", me.username, me.email);
        }
        Command::Posts(cmd) => posts(api, notes, cmd).await?,
        Command::Plans(cmd) => plans(api, notes, cmd).await?,
        Command::Follow(cmd) => follow(api, notes, cmd).await?,
        Command::Suggestions => {
            let users = UsersApi::new(api.clone());
            let (me, everyone) = tokio::try_join!(users.me(), users.all())?;
            let statuses = HashMap::new();
            let sidebar = Sidebar {
                current: Some(&me),
                all_users: &everyone,
                statuses: &statuses,
                media_host: &api.config().media_host,
            };
            for row in sidebar.suggestions() {
                println!("#{} {} [{}]", row.user.id, row.user.username, row.button.label);
            }
        }
        Command::Status(cmd) => {
            let mut profile = Profile::new(api, notes);
            match cmd {
                StatusCommand::List => profile.load().await,
                StatusCommand::Upload { file } => {
                    profile.upload_status(&MediaFile::from_path(file)?).await;
                }
                StatusCommand::Delete { id } => {
                    profile.delete_status(id).await;
                }
            }
            for status in profile.statuses() {
                println!("#{} {}", status.id, status.media_path.as_deref().unwrap_or("-"));
            }
        }
        Command::Comments(cmd) => {
            let comments = CommentsApi::new(api);
            match cmd {
                CommentsCommand::List { post_id } => {
                    for c in comments.list(post_id).await? {
                        let author = c.user.map(|u| u.username).unwrap_or_default();
                        println!("#{} {}: {}", c.id, author, c.content);
                    }
                }
                CommentsCommand::Add { post_id, content } => {
                    let c = comments.add(post_id, &content).await?;
                    println!("#{}", c.id);
                }
                CommentsCommand::Edit { id, content } => comments.edit(id, &content).await?,
                CommentsCommand::Delete { id } => comments.delete(id).await?,
            }
        }
    }
    Ok(())
}

async fn posts(api: ApiClient, notes: Arc<dyn Notifier>, cmd: PostsCommand) -> anyhow::Result<()> {
    let mut profile = Profile::new(api.clone(), notes);
    let view = &mut profile.posts;
    match cmd {
        PostsCommand::List => {
            view.load().await;
            print_posts(view);
        }
        PostsCommand::Show { id } => {
            let post = PostRepository::new(api.clone()).get(id).await?;
            println!("#{} {}\n{}", post.id, post.title, post.description);
            let form = PostForm::from_item(&post);
            for media in form.existing_media(&api.config().media_host) {
                println!("  {:?} {}", media.kind, media.url);
            }
        }
        PostsCommand::Create { title, description, files } => {
            let mut form = PostForm { title, description, ..PostForm::default() };
            form.pending.add_paths(&files)?;
            view.open_create_with(form);
            if view.submit().await == SubmitOutcome::Saved {
                print_posts(view);
            }
        }
        PostsCommand::Edit { id, title, description, files } => {
            if !profile.edit_post(id).await {
                return Ok(());
            }
            let view = &mut profile.posts;
            if let Some(form) = view.form_mut() {
                form.title = title.unwrap_or(std::mem::take(&mut form.title));
                form.description = description.unwrap_or(std::mem::take(&mut form.description));
                form.pending.add_paths(&files)?;
            }
            if view.submit().await == SubmitOutcome::Saved {
                print_posts(view);
            }
        }
        PostsCommand::Delete { id, confirm: c } => {
            view.request_delete(id);
            if confirm("Delete post?", &c)? {
                view.confirm_delete().await;
            } else {
                view.cancel_delete();
            }
        }
    }
    Ok(())
}

async fn plans(api: ApiClient, notes: Arc<dyn Notifier>, cmd: PlansCommand) -> anyhow::Result<()> {
    let mut view = LearningPlansView::new(LearningPlanRepository::new(api), notes, PLAN_LABELS);
    match cmd {
        PlansCommand::List => {
            view.load().await;
            print_plans(&view);
        }
        PlansCommand::Create { title, topics, resources, target_date, progress } => {
            view.open_create_with(LearningPlanForm { title, topics, resources, target_date, progress });
            if view.submit().await == SubmitOutcome::Saved {
                print_plans(&view);
            }
        }
        PlansCommand::Edit { id, title, topics, resources, target_date, progress } => {
            if !view.load().await {
                return Ok(());
            }
            if !view.open_edit(id) {
                bail!("no learning plan #{id}");
            }
            let form = view.form_mut().context("edit dialog did not open")?;
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(topics) = topics {
                form.topics = topics;
            }
            if let Some(resources) = resources {
                form.resources = resources;
            }
            if let Some(target_date) = target_date {
                form.target_date = target_date;
            }
            if let Some(progress) = progress {
                form.progress = progress;
            }
            if view.submit().await == SubmitOutcome::Saved {
                print_plans(&view);
            }
        }
        PlansCommand::Delete { id, confirm: c } => {
            view.request_delete(id);
            if confirm("Delete learning plan?", &c)? {
                view.confirm_delete().await;
            } else {
                view.cancel_delete();
            }
        }
    }
    Ok(())
}

async fn follow(api: ApiClient, notes: Arc<dyn Notifier>, cmd: FollowCommand) -> anyhow::Result<()> {
    let follow = FollowApi::new(api);
    match cmd {
        FollowCommand::Counts => {
            let counts = follow.counts().await?;
            println!("{} followers, {} following", counts.followers, counts.following);
        }
        FollowCommand::Requests => {
            let mut panel = FollowRequests::new(follow, notes);
            panel.load().await;
            for req in panel.requests() {
                println!("#{} {} <{}>", req.id, req.follower.username, req.follower.email);
            }
        }
        FollowCommand::Accept { id } => {
            let mut panel = FollowRequests::new(follow, notes);
            panel.accept(id).await;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let notifier = Arc::new(ConsoleNotifier::default());
    run(cli, notifier.clone()).await?;

    if notifier.failed() {
        std::process::exit(1);
    }
    Ok(())
}
