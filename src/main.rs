mod editor;
mod geometry;
mod graph;
mod input;
mod node;
mod node_kind;

use chrono::Local;
use eframe::egui;
use editor::GraphEditor;
use graph::Graph;
use node_kind::NodeKind;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Chainflow",
        native_options,
        Box::new(|_cc| Ok(Box::new(App::default()))),
    )
}

struct App {
    graph: Graph,
    editor: GraphEditor,
    graph_name: String,
    logs: Vec<String>,
    show_load_window: bool,
}

impl Default for App {
    fn default() -> Self {
        // Seed a small starter chain so the canvas isn't empty on first run.
        let mut graph = Graph::new();
        graph.add_node(
            NodeKind::Trigger,
            egui::pos2(120.0, 160.0),
            geometry::DEFAULT_NODE_SIZE,
        );
        graph.add_node(
            NodeKind::Delay { duration_ms: 1000 },
            egui::pos2(420.0, 160.0),
            geometry::DEFAULT_NODE_SIZE,
        );

        Self {
            graph,
            editor: GraphEditor::default(),
            graph_name: "untitled".to_string(),
            logs: Vec::new(),
            show_load_window: false,
        }
    }
}

impl App {
    fn log(&mut self, msg: impl Into<String>) {
        let time = Local::now().format("%H:%M:%S");
        self.logs.push(format!("[{}] {}", time, msg.into()));
    }

    fn save_graph(&self) -> anyhow::Result<String> {
        std::fs::create_dir_all("graphs")?;
        let name = if self.graph_name.ends_with(".json") {
            self.graph_name.clone()
        } else {
            format!("{}.json", self.graph_name)
        };
        let json = serde_json::to_string_pretty(&self.graph)?;
        std::fs::write(format!("graphs/{}", name), json)?;
        Ok(name)
    }

    fn load_graph(&mut self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = std::fs::read_to_string(path)?;
        self.graph = serde_json::from_str(&json)?;
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            self.graph_name = stem.to_string();
        }
        Ok(())
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Chainflow");
                ui.separator();
                ui.label("Graph:");
                ui.add(egui::TextEdit::singleline(&mut self.graph_name).desired_width(150.0));

                if ui.button("New").clicked() {
                    self.graph = Graph::new();
                    self.graph_name = "untitled".to_string();
                    self.log("New graph created.");
                }
                if ui.button("Save").clicked() {
                    match self.save_graph() {
                        Ok(name) => {
                            log::info!("saved graphs/{}", name);
                            self.log(format!("Saved graphs/{}", name));
                        }
                        Err(e) => self.log(format!("Save failed: {}", e)),
                    }
                }
                if ui.button("Load").clicked() {
                    self.show_load_window = !self.show_load_window;
                }

                ui.separator();
                ui.label(format!("Nodes: {}", self.graph.len()));
            });
        });

        let mut show_load_window = self.show_load_window;
        let mut load_path = None;
        if show_load_window {
            egui::Window::new("Load Graph")
                .open(&mut show_load_window)
                .show(ctx, |ui| {
                    if let Ok(entries) = std::fs::read_dir("graphs") {
                        for entry in entries.flatten() {
                            if let Ok(name) = entry.file_name().into_string() {
                                if name.ends_with(".json") && ui.button(&name).clicked() {
                                    load_path = Some(entry.path());
                                }
                            }
                        }
                    } else {
                        ui.label("No saved graphs yet.");
                    }
                });
        }
        self.show_load_window = show_load_window;

        if let Some(path) = load_path {
            match self.load_graph(&path) {
                Ok(()) => {
                    log::info!("loaded {}", path.display());
                    self.log(format!("Loaded {}", path.display()));
                    self.show_load_window = false;
                }
                Err(e) => self.log(format!("Load failed: {}", e)),
            }
        }

        egui::Window::new("Output Log")
            .resizable(true)
            .collapsible(true)
            .default_width(400.0)
            .default_height(150.0)
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
            .show(ctx, |ui| {
                if ui.button("Clear").clicked() {
                    self.logs.clear();
                }
                ui.separator();
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for line in &self.logs {
                            ui.label(line);
                        }
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.editor.show(ui, &mut self.graph);
        });
    }
}
