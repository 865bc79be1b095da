use crate::core::Core;

pub fn process(command: &str, core: &Core) {
    let tokens = command.split_whitespace().collect::<Vec<&str>>();

    match tokens.first() {
        Some(&"config") => process_config(&tokens, core),
        Some(&"clients") => process_clients(&tokens, core),
        Some(&"game") => process_game(&tokens, core),
        Some(&"help") => process_help(&tokens, core),
        _ => println!("Unknown command"),
    }
}

fn process_config(tokens: &[&str], core: &Core) {
    if tokens.len() < 2 {
        println!("Unknown parameter");
        return;
    }

    match tokens.get(1) {
        Some(&"show") => process_config_show(tokens, core),
        Some(&"reload") => process_config_reload(tokens, core),
        _ => println!("Unknown parameter"),
    }
}

fn process_config_show(_tokens: &[&str], core: &Core) {
    let mut data = Vec::default();
    let config = core.config.read();

    data.push(format!(" - endpoint: {}", config.data.endpoint));
    data.push(format!(" - simulation tick: {} ms", config.data.tick));
    data.push(format!(" - capture tick: {} ms", config.data.capture_tick));
    data.push(format!(" - stream tick: {} ms", config.data.stream_tick));
    data.push(format!(" - client ping interval: {} ms", config.data.client_ping_interval));
    data.push(format!(" - camera: {}x{}", config.data.camera_width, config.data.camera_height));

    drop(config);

    println!("Current configuration:");
    println!("{}", data.join("\n"));
}

fn process_config_reload(_tokens: &[&str], core: &Core) {
    println!("Reloading configuration file");
    core.config.write().reload();
    println!("Configuration reloaded");
}

fn process_clients(tokens: &[&str], core: &Core) {
    if tokens.len() < 2 {
        println!("Unknown parameter");
        return;
    }

    match tokens.get(1) {
        Some(&"list") => process_clients_list(tokens, core),
        _ => println!("Unknown parameter"),
    }
}

fn process_clients_list(_tokens: &[&str], core: &Core) {
    let mut data = Vec::default();
    let clients = core.clients.read();
    let streams = core.streams.read();

    for (id, client) in clients.iter() {
        let stream = if streams.contains(id) { "streaming" } else { "control only" };
        data.push(format!(" - {}, ping {} ms, {}", id, *client.ping.read(), stream));
    }

    drop(streams);
    drop(clients);

    if data.is_empty() {
        println!("No clients connected");
    } else {
        println!("Connected clients:");
        println!("{}", data.join("\n"));
    }
}

fn process_game(tokens: &[&str], core: &Core) {
    if tokens.len() < 2 {
        println!("Unknown parameter");
        return;
    }

    match tokens.get(1) {
        Some(&"status") => process_game_status(tokens, core),
        Some(&"start") => process_game_start(tokens, core),
        Some(&"advance") => process_game_advance(tokens, core),
        Some(&"reset") => process_game_reset(tokens, core),
        _ => println!("Unknown parameter"),
    }
}

fn process_game_status(_tokens: &[&str], core: &Core) {
    let world = core.world.read();
    let status = world.status();

    println!("Level {}/{}, phase {}, {} segments drawn", status.level, status.total_levels, status.phase, world.segments.len());
}

fn process_game_start(_tokens: &[&str], core: &Core) {
    let phase = core.world.write().request_start();
    println!("Phase is now {}", phase);
}

fn process_game_advance(_tokens: &[&str], core: &Core) {
    let level = core.world.write().request_advance();
    println!("Level is now {}", level + 1);
}

fn process_game_reset(_tokens: &[&str], core: &Core) {
    let phase = core.world.write().request_reset();
    println!("Game rewound to level 1, phase is now {}", phase);
}

fn process_help(_tokens: &[&str], _core: &Core) {
    println!("Commands:");
    println!(" - config [show/reload]");
    println!(" - clients [list]");
    println!(" - game [status/start/advance/reset]");
    println!(" - help");
}
