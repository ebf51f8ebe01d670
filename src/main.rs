//!
//! shopfront binary
//! ----------------
//! Interactive terminal client for the storefront gateway. Restores the
//! persisted session on startup, gates every command through the role
//! policy, and talks to the backend REST API for everything else.

use std::env;
use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use shopfront::api::models::{CreateProductRequest, NewOrderItem, UserProfile};
use shopfront::api::ApiClient;
use shopfront::cli::{print_orders, print_products, print_profile};
use shopfront::config::Config;
use shopfront::error::AppError;
use shopfront::identity::{can, status_for, Action, Screen, SessionStore};
use shopfront::view::{reduce, Event, ProfileSource, ViewState};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--api <url>] [--home <dir>] [--user <u> --password <p>] [--command \"<cmd>\"]\n  {program} --repl   # explicit interactive mode (default when no --command)\n\nFlags:\n  --api <url>              Gateway base URL (default: $SHOPFRONT_API_BASE or http://localhost:8080)\n  --home <dir>             Client state directory (default: $SHOPFRONT_HOME or .shopfront)\n  --user <u>               Username for auto-login at startup\n  --password <p>           Password for auto-login at startup\n  -c, --command <cmd>      Run one shell command and exit (unless --repl)\n  --repl                   Start the interactive shell\n  -h, --help               Show this help\n\nShell commands:\n  login <user> <password>            obtain a credential and start a session\n  register <user> <email> <password> create an account\n  logout                             end the session (safe to repeat)\n  whoami                             show the decoded identity of the session\n  status                             show gateway and session info\n  products                           list the catalog\n  add-product <name> <price> <category> <stock> [description...]   (MANAGER/ADMIN)\n  orders                             list your orders (login required)\n  order <productId>x<qty> [...]      place an order (USER)\n  cancel <orderId>                   cancel your pending order (USER)\n  approve <orderId>                  mark a pending order delivered (ADMIN)\n  reject <orderId>                   reject a pending order (ADMIN)\n  profile                            show your profile\n  help                               show this help\n  quit | exit                        leave the shell\n\nExamples:\n  {program} --command \"products\"\n  {program} --user alice --password pw\n  {program} --api http://shop.internal:8080 --repl"
    );
}

fn main() -> Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info")).unwrap();
    fmt().with_env_filter(filter).init();

    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut api_override: Option<String> = None;
    let mut home_override: Option<String> = None;
    let mut auto_user: Option<String> = None;
    let mut auto_password: Option<String> = None;
    let mut one_shot: Option<String> = None;
    let mut repl = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--api" => {
                if i + 1 >= args.len() { eprintln!("--api requires a value"); print_usage(&program); std::process::exit(2); }
                api_override = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--home" => {
                if i + 1 >= args.len() { eprintln!("--home requires a value"); print_usage(&program); std::process::exit(2); }
                home_override = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--user" => {
                if i + 1 >= args.len() { eprintln!("--user requires a value"); print_usage(&program); std::process::exit(2); }
                auto_user = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--password" => {
                if i + 1 >= args.len() { eprintln!("--password requires a value"); print_usage(&program); std::process::exit(2); }
                auto_password = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--command" | "-c" => {
                if i + 1 >= args.len() { eprintln!("--command requires a value"); print_usage(&program); std::process::exit(2); }
                one_shot = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--repl" => { repl = true; i += 1; continue; }
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            unk => {
                eprintln!("Unrecognized argument: {}", unk);
                print_usage(&program);
                std::process::exit(2);
            }
        }
    }

    let cfg = Config::from_env().with_overrides(api_override, home_override);

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "shopfront",
        "shopfront starting: RUST_LOG='{}', api_base='{}', home='{}'",
        rust_log, cfg.api_base, cfg.home.display()
    );

    let api = ApiClient::new(&cfg.api_base).with_context(|| format!("bad API base '{}'", cfg.api_base))?;
    let session = SessionStore::open(cfg.session_file());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    let mut state = ViewState::default();

    if let (Some(user), Some(pass)) = (auto_user.as_deref(), auto_password.as_deref()) {
        match do_login(&rt, &api, &session, user, pass) {
            Ok(name) => println!("logged in as {}", name),
            Err(e) => eprintln!("auto-login failed: {}", e),
        }
        apply(&mut state, Event::SessionChanged);
    }

    if let Some(cmd) = one_shot {
        handle_line(&rt, &api, &session, &mut state, &cmd);
        if !repl {
            return Ok(());
        }
    }

    // Interactive shell
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = String::new();
    println!("shopfront shell. Type 'help' for commands.");
    loop {
        input.clear();
        print!("> ");
        let _ = stdout.flush();
        if stdin.read_line(&mut input).is_err() { break; }
        if input.is_empty() { break; } // EOF
        let line = input.trim();
        if line.is_empty() { continue; }
        if !handle_line(&rt, &api, &session, &mut state, line) {
            break;
        }
    }
    Ok(())
}

fn apply(state: &mut ViewState, event: Event) {
    *state = reduce(std::mem::take(state), event);
}

/// Dispatch one shell command. Returns false when the shell should exit.
fn handle_line(
    rt: &tokio::runtime::Runtime,
    api: &ApiClient,
    session: &SessionStore,
    state: &mut ViewState,
    line: &str,
) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = parts.first() else { return true };
    let cmd = first.to_lowercase();
    match cmd.as_str() {
        "quit" | "exit" => return false,
        "help" => print_usage("shopfront"),
        "status" => {
            println!("gateway: {}", api.base());
            match session.claims() {
                Some(claims) => println!("session: {} (role {:?})", claims.subject(), claims.role),
                None => println!("session: anonymous"),
            }
        }
        "whoami" => match session.claims() {
            Some(claims) => println!("{} (role {:?})", claims.subject(), claims.role),
            None => println!("anonymous"),
        },
        "register" => {
            if parts.len() != 4 {
                eprintln!("usage: register <user> <email> <password>");
                return true;
            }
            let req = shopfront::api::models::RegisterRequest {
                username: parts[1].to_string(),
                email: parts[2].to_string(),
                password: parts[3].to_string(),
            };
            match rt.block_on(api.register(&req)) {
                Ok(()) => println!("registration successful, you can now log in"),
                Err(e) => eprintln!("error: {}", e),
            }
        }
        "login" => {
            if parts.len() != 3 {
                eprintln!("usage: login <user> <password>");
                return true;
            }
            match do_login(rt, api, session, parts[1], parts[2]) {
                Ok(name) => {
                    println!("logged in as {}", name);
                    apply(state, Event::SessionChanged);
                }
                Err(e) => eprintln!("error: {}", e),
            }
        }
        "logout" => {
            match session.clear() {
                Ok(()) => {
                    println!("logged out");
                    apply(state, Event::SessionChanged);
                }
                Err(e) => eprintln!("error: {}", e),
            }
        }
        "products" => {
            refresh_products(rt, api, session, state);
        }
        "add-product" => {
            if !can(session.claims().as_ref(), Action::AddProduct) {
                eprintln!("not permitted: add-product requires a MANAGER or ADMIN session");
                return true;
            }
            if parts.len() < 5 {
                eprintln!("usage: add-product <name> <price> <category> <stock> [description...]");
                return true;
            }
            let (Ok(price), Ok(stock)) = (parts[2].parse::<f64>(), parts[4].parse::<i64>()) else {
                eprintln!("price and stock must be numeric");
                return true;
            };
            let req = CreateProductRequest {
                name: parts[1].to_string(),
                description: parts[5..].join(" "),
                price,
                category: parts[3].to_string(),
                stock_quantity: stock,
            };
            // Policy said yes, so a credential exists
            let Some(token) = session.current() else { return true };
            match rt.block_on(api.create_product(&token, &req)) {
                Ok(()) => {
                    println!("product added");
                    refresh_products(rt, api, session, state);
                }
                Err(e) => eprintln!("error: {}", e),
            }
        }
        "orders" => {
            // Gate locally before any network call: anonymous has no orders view.
            if !can(session.claims().as_ref(), Action::ViewOrders) {
                eprintln!("not permitted: log in to view orders");
                return true;
            }
            // The order form needs the catalog for product ids; load it
            // first so an orders failure still surfaces below.
            let token = session.current();
            if let Ok(products) = rt.block_on(api.products(token.as_deref())) {
                let generation = state.fetch_generation();
                apply(state, Event::ProductsLoaded { generation, result: Ok(products) });
            }
            refresh_orders(rt, api, session, state);
            render_current(state, session);
        }
        "order" => {
            if !can(session.claims().as_ref(), Action::PlaceOrder) {
                eprintln!("not permitted: placing orders requires a USER session");
                return true;
            }
            let items = match parse_order_items(&parts[1..]) {
                Ok(items) => items,
                Err(msg) => {
                    eprintln!("{}", msg);
                    return true;
                }
            };
            let Some(token) = session.current() else { return true };
            match rt.block_on(api.place_order(&token, items)) {
                Ok(()) => {
                    println!("order placed");
                    refresh_orders(rt, api, session, state);
                    render_current(state, session);
                }
                Err(e) => eprintln!("error: {}", e),
            }
        }
        "cancel" | "approve" | "reject" => {
            let action = match cmd.as_str() {
                "cancel" => Action::CancelOwnOrder,
                "approve" => Action::ApproveOrder,
                _ => Action::RejectOrder,
            };
            // Lifecycle actions always map to a target status
            let Some(status) = status_for(action) else { return true };
            if !can(session.claims().as_ref(), action) {
                eprintln!("not permitted: '{}' is not available to this session", cmd);
                return true;
            }
            let Some(id) = parts.get(1).and_then(|s| s.parse::<i64>().ok()) else {
                eprintln!("usage: {} <orderId>", cmd);
                return true;
            };
            let Some(token) = session.current() else { return true };
            match rt.block_on(api.set_order_status(&token, id, status)) {
                Ok(()) => {
                    println!("order {} -> {}", id, status);
                    refresh_orders(rt, api, session, state);
                    render_current(state, session);
                }
                Err(e) => eprintln!("error: {}", e),
            }
        }
        "profile" => {
            if !can(session.claims().as_ref(), Action::ViewProfile) {
                eprintln!("not permitted: log in to view your profile");
                return true;
            }
            apply(state, Event::NavigatedTo(Screen::Profile));
            let generation = state.fetch_generation();
            let Some(token) = session.current() else { return true };
            let result = match rt.block_on(api.me(&token)) {
                Ok(profile) => Ok((profile, ProfileSource::Backend)),
                Err(e) => {
                    // Endpoint optional in some deployments; distinguish the
                    // fallback instead of passing it off as backend data.
                    warn!(target: "shopfront", error = %e, "profile endpoint failed, falling back to token claims");
                    match session.claims() {
                        Some(claims) => Ok((UserProfile::from_claims(&claims), ProfileSource::TokenClaims)),
                        None => Err(e.to_string()),
                    }
                }
            };
            apply(state, Event::ProfileLoaded { generation, result });
            render_current(state, session);
        }
        unk => {
            eprintln!("unknown command: {} (try 'help')", unk);
        }
    }
    true
}

fn do_login(
    rt: &tokio::runtime::Runtime,
    api: &ApiClient,
    session: &SessionStore,
    user: &str,
    pass: &str,
) -> Result<String, AppError> {
    let resp = rt.block_on(api.login(user, pass))?;
    let token = resp
        .token
        .ok_or_else(|| AppError::backend::<String>("missing_token".into(), "no token received from login".into()))?;
    session.establish(&token)?;
    let claims = session.claims().unwrap_or_default();
    Ok(format!("{} (role {:?})", claims.subject(), claims.role))
}

fn refresh_products(
    rt: &tokio::runtime::Runtime,
    api: &ApiClient,
    session: &SessionStore,
    state: &mut ViewState,
) {
    apply(state, Event::NavigatedTo(Screen::Products));
    let generation = state.fetch_generation();
    let token = session.current();
    let result = rt.block_on(api.products(token.as_deref())).map_err(|e| e.to_string());
    apply(state, Event::ProductsLoaded { generation, result });
    render_current(state, session);
}

fn refresh_orders(
    rt: &tokio::runtime::Runtime,
    api: &ApiClient,
    session: &SessionStore,
    state: &mut ViewState,
) {
    let Some(token) = session.current() else { return };
    apply(state, Event::NavigatedTo(Screen::Orders));
    let generation = state.fetch_generation();
    let result = rt.block_on(api.orders(&token)).map_err(|e| e.to_string());
    apply(state, Event::OrdersLoaded { generation, result });
}

fn render_current(state: &ViewState, session: &SessionStore) {
    if let Some(err) = &state.error {
        eprintln!("error: {}", err);
        return;
    }
    let claims = session.claims();
    match state.screen {
        Some(Screen::Products) => {
            let can_order = can(claims.as_ref(), Action::PlaceOrder);
            print_products(&state.products, can_order);
            if can(claims.as_ref(), Action::AddProduct) {
                println!("add a product with: add-product <name> <price> <category> <stock> [description...]");
            }
        }
        Some(Screen::Orders) => {
            print_orders(&state.orders, claims.as_ref());
            if can(claims.as_ref(), Action::PlaceOrder) {
                println!("place a new order with: order <productId>x<qty> [...]");
            }
        }
        Some(Screen::Profile) => {
            if let Some((profile, source)) = &state.profile {
                print_profile(profile, *source);
            }
        }
        Some(Screen::Home) | None => {}
    }
}

/// Parse `<productId>x<qty>` arguments, e.g. `order 3x2 5x1`.
fn parse_order_items(args: &[&str]) -> Result<Vec<NewOrderItem>, String> {
    if args.is_empty() {
        return Err("usage: order <productId>x<qty> [...]".to_string());
    }
    let mut items = Vec::with_capacity(args.len());
    for arg in args {
        let Some((id, qty)) = arg.split_once('x') else {
            return Err(format!("bad item '{}': expected <productId>x<qty>", arg));
        };
        let (Ok(product_id), Ok(quantity)) = (id.parse::<i64>(), qty.parse::<i64>()) else {
            return Err(format!("bad item '{}': id and quantity must be numeric", arg));
        };
        if quantity < 1 {
            return Err(format!("bad item '{}': quantity must be at least 1", arg));
        }
        items.push(NewOrderItem { product_id, quantity });
    }
    Ok(items)
}
