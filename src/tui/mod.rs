//! TUI module - Terminal front end with ratatui

mod form;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::{stdout, Stdout};

use crate::app::App;
use crate::media::{self, MediaKind};
use crate::nav::{Gender, Screen, TrainingLevel};
use crate::plan::{Day, ScheduledWorkout};
use crate::workouts::{MuscleGroup, Workout};

use form::DraftForm;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Default)]
struct LoginForm {
    fields: [String; 3], // name, email, password
    focus: usize,
}

/// Terminal state wrapped around the application controller
pub struct TuiApp {
    app: App,
    login: LoginForm,
    /// Admin create/edit form, open over the admin panel
    form: Option<DraftForm>,
    cursor: usize,
    seen_screen: Screen,
    should_quit: bool,
}

impl TuiApp {
    pub fn new(app: App) -> Self {
        let seen_screen = app.screen();
        Self {
            app,
            login: LoginForm::default(),
            form: None,
            cursor: 0,
            seen_screen,
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let who = self
            .app
            .session()
            .map(|s| format!(" | {}{}", s.name, if s.is_admin { " (admin)" } else { "" }))
            .unwrap_or_default();
        let header = Paragraph::new(format!("TREINOFIT - {}{}", screen_title(self.app.screen()), who))
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        match self.app.screen() {
            Screen::Login => self.render_login(frame, chunks[1]),
            Screen::Home => self.render_home(frame, chunks[1]),
            Screen::LevelSelect => render_levels(frame, chunks[1]),
            Screen::WorkoutList => self.render_workouts(frame, chunks[1], self.app.catalog().list().iter().collect()),
            Screen::AdminPanel => self.render_admin(frame, chunks[1]),
            Screen::WeeklyPlan => self.render_plan(frame, chunks[1]),
            Screen::WorkoutDetail => self.render_detail(frame, chunks[1]),
        }

        // Footer: notice wins over key hints
        let footer = match self.app.notice() {
            Some(notice) => Paragraph::new(notice.to_string()).style(Style::default().fg(Color::Yellow)),
            None => {
                let hints = match self.form {
                    Some(_) if self.app.screen() == Screen::AdminPanel => FORM_HINTS,
                    _ => key_hints(self.app.screen()),
                };
                Paragraph::new(hints).style(Style::default().fg(Color::DarkGray))
            }
        };
        frame.render_widget(footer.block(Block::default().borders(Borders::ALL)), chunks[2]);

        let selections = &self.app.nav().selections;
        if let Some(workout) = &selections.pending_workout {
            render_day_picker(frame, workout);
        } else if selections.clear_requested {
            render_confirm(frame, "Deseja apagar todo o cronograma? (s/n)");
        } else if let Some(target) = &selections.delete_target {
            render_confirm(frame, &format!("Excluir \"{}\"? (s/n)", target.name));
        } else if let Some(exercise) = &selections.detail_exercise {
            let mut lines = vec![
                Line::from(exercise.name.clone()).bold(),
                Line::from(format!("Séries: {}", exercise.sets)),
                Line::from(media_line(exercise.media_url.as_deref())),
            ];
            if let Some(explanation) = &exercise.explanation {
                lines.push(Line::from(""));
                lines.push(Line::from(explanation.clone()));
            }
            render_popup(frame, "Exercício", lines);
        }
    }

    fn render_login(&self, frame: &mut Frame, area: Rect) {
        let labels = ["Nome", "E-mail", "Senha"];
        let lines: Vec<Line> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let value = if i == 2 {
                    "*".repeat(self.login.fields[i].chars().count())
                } else {
                    self.login.fields[i].clone()
                };
                let style = if i == self.login.focus {
                    Style::default().fg(Color::Cyan).bold()
                } else {
                    Style::default()
                };
                Line::from(format!("{:>8}: {}", label, value)).style(style)
            })
            .collect();
        let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Entrar"));
        frame.render_widget(form, area);
    }

    fn render_home(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(format!("Treinos no cronograma: {}", self.app.plan().total())),
            Line::from(""),
            Line::from("[m] Masculino   [f] Feminino"),
            Line::from("[p] Meu cronograma"),
        ];
        if self.app.is_admin() {
            lines.push(Line::from("[a] Painel do administrador"));
        }
        let home = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Início"));
        frame.render_widget(home, area);
    }

    fn render_workouts(&self, frame: &mut Frame, area: Rect, workouts: Vec<&Workout>) {
        let title = self
            .app
            .nav()
            .selections
            .level
            .map(|l| l.label())
            .unwrap_or("Treinos");
        let items: Vec<ListItem> = workouts
            .iter()
            .map(|w| {
                ListItem::new(format!(
                    "{:<28} {:<18} {:>7}  {} exercícios",
                    w.name,
                    w.muscle_group.label(),
                    w.duration,
                    w.exercises.len()
                ))
            })
            .collect();
        self.render_list(frame, area, title.to_string(), items);
    }

    fn render_admin(&self, frame: &mut Frame, area: Rect) {
        if let Some(form) = &self.form {
            form.render(frame, area);
            return;
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        let filters: Vec<Span> = MuscleGroup::all()
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let text = format!("[{}] {}  ", i + 1, g.label());
                if self.app.admin_filters().contains(g) {
                    Span::styled(text, Style::default().fg(Color::Green).bold())
                } else {
                    Span::raw(text)
                }
            })
            .collect();
        let bar = Paragraph::new(Line::from(filters)).block(Block::default().borders(Borders::ALL).title("Filtros"));
        frame.render_widget(bar, chunks[0]);

        self.render_workouts(frame, chunks[1], self.app.filtered_workouts());
    }

    fn render_plan(&self, frame: &mut Frame, area: Rect) {
        let mut items = Vec::new();
        let mut index = 0;
        for (day, list) in self.app.plan().plan().days() {
            items.push(ListItem::new(format!("{} ({})", day, list.len())).style(Style::default().bold()));
            for scheduled in list {
                let marker = if index == self.cursor { ">" } else { " " };
                items.push(ListItem::new(format!(
                    "  {} {} - {}",
                    marker, scheduled.workout.name, scheduled.workout.duration
                )));
                index += 1;
            }
        }
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Meu Plano"));
        frame.render_widget(list, area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let Some(workout) = &self.app.nav().selections.detail_workout else {
            return;
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(5)])
            .split(area);

        let info = Paragraph::new(vec![
            Line::from(format!("{} | {}", workout.muscle_group.label(), workout.duration)),
            Line::from(workout.description.clone()),
            Line::from(media_line(workout.media_url.as_deref())),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(workout.name.clone()));
        frame.render_widget(info, chunks[0]);

        let items: Vec<ListItem> = workout
            .exercises
            .iter()
            .enumerate()
            .map(|(i, ex)| {
                let video = if media::classify(ex.media_url.as_deref()).is_video() { " [vídeo]" } else { "" };
                ListItem::new(format!("{}. {:<28} {}{}", i + 1, ex.name, ex.sets, video))
            })
            .collect();
        self.render_list(frame, chunks[1], "Exercícios".to_string(), items);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, title: String, items: Vec<ListItem>) {
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    if self.app.screen() != Screen::Login {
                        self.app.dismiss_notice();
                    }
                    self.handle_key(key);
                    if self.app.screen() != self.seen_screen {
                        self.seen_screen = self.app.screen();
                        self.cursor = 0;
                    }
                }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Modal prompts take every key while open
        if self.app.nav().selections.pending_workout.is_some() {
            match key.code {
                KeyCode::Char(c) => {
                    if let Some(day) = c.to_digit(10).and_then(|d| Day::all().get((d as usize).wrapping_sub(1))) {
                        self.app.assign_pending(*day);
                    }
                }
                KeyCode::Esc => self.app.cancel_schedule(),
                _ => {}
            }
            return;
        }
        if self.app.nav().selections.clear_requested {
            match key.code {
                KeyCode::Char('s') | KeyCode::Char('y') => {
                    self.app.confirm_clear_week();
                    self.cursor = 0;
                }
                _ => self.app.cancel_clear_week(),
            }
            return;
        }
        if self.app.nav().selections.delete_target.is_some() {
            match key.code {
                KeyCode::Char('s') | KeyCode::Char('y') => {
                    self.app.confirm_delete();
                    self.cursor = self.cursor.saturating_sub(1);
                }
                _ => self.app.cancel_delete(),
            }
            return;
        }
        if self.app.nav().selections.detail_exercise.is_some() {
            self.app.close_exercise();
            return;
        }

        match self.app.screen() {
            Screen::Login => self.handle_login_key(key),
            Screen::Home => match key.code {
                KeyCode::Char('m') => self.app.select_gender(Gender::Male),
                KeyCode::Char('f') => self.app.select_gender(Gender::Female),
                KeyCode::Char('p') => {
                    self.app.navigate(Screen::WeeklyPlan);
                }
                KeyCode::Char('a') => {
                    self.app.navigate(Screen::AdminPanel);
                }
                KeyCode::Char('l') => self.app.logout(),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            Screen::LevelSelect => match key.code {
                KeyCode::Char(c) => {
                    if let Some(level) = c.to_digit(10).and_then(|d| TrainingLevel::all().get((d as usize).wrapping_sub(1))) {
                        self.app.select_level(*level);
                    }
                }
                KeyCode::Esc => {
                    self.app.navigate(Screen::Home);
                }
                _ => {}
            },
            Screen::WorkoutList => {
                let workouts: Vec<Workout> = self.app.catalog().list().to_vec();
                match key.code {
                    KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
                    KeyCode::Down => self.cursor = (self.cursor + 1).min(workouts.len().saturating_sub(1)),
                    KeyCode::Enter => {
                        if let Some(w) = workouts.get(self.cursor) {
                            self.app.open_workout_detail(w.clone());
                        }
                    }
                    KeyCode::Char('a') => {
                        if let Some(w) = workouts.get(self.cursor) {
                            self.app.request_schedule(w.clone());
                        }
                    }
                    KeyCode::Esc => {
                        self.app.navigate(Screen::LevelSelect);
                    }
                    _ => {}
                }
            }
            Screen::WeeklyPlan => {
                let entries = flatten_plan(&self.app);
                match key.code {
                    KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
                    KeyCode::Down => self.cursor = (self.cursor + 1).min(entries.len().saturating_sub(1)),
                    KeyCode::Enter => {
                        if let Some((_, s)) = entries.get(self.cursor) {
                            self.app.open_workout_detail(s.workout.clone());
                        }
                    }
                    KeyCode::Char('d') => {
                        if let Some((day, s)) = entries.get(self.cursor) {
                            self.app.unschedule(*day, &s.planned_id);
                            self.cursor = self.cursor.saturating_sub(1);
                        }
                    }
                    KeyCode::Char('c') => self.app.request_clear_week(),
                    KeyCode::Esc => {
                        self.app.navigate(Screen::Home);
                    }
                    _ => {}
                }
            }
            Screen::AdminPanel => {
                if self.form.is_some() {
                    self.handle_form_key(key);
                    return;
                }
                let ids: Vec<String> = self.app.filtered_workouts().iter().map(|w| w.id.clone()).collect();
                match key.code {
                    KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
                    KeyCode::Down => self.cursor = (self.cursor + 1).min(ids.len().saturating_sub(1)),
                    KeyCode::Char('d') => {
                        if let Some(id) = ids.get(self.cursor) {
                            self.app.request_delete(id);
                        }
                    }
                    KeyCode::Enter => {
                        if let Some(w) = ids.get(self.cursor).and_then(|id| self.app.catalog().get(id)).cloned() {
                            self.app.open_workout_detail(w);
                        }
                    }
                    KeyCode::Char('n') => {
                        self.form = self.app.new_workout_draft().map(DraftForm::new);
                    }
                    KeyCode::Char('e') => {
                        if let Some(id) = ids.get(self.cursor) {
                            self.form = self.app.edit_workout(id).map(DraftForm::new);
                        }
                    }
                    KeyCode::Char(c) => {
                        if let Some(group) = c.to_digit(10).and_then(|d| MuscleGroup::all().get((d as usize).wrapping_sub(1))) {
                            self.app.toggle_filter(*group);
                            self.cursor = 0;
                        }
                    }
                    KeyCode::Esc => {
                        self.app.navigate(Screen::Home);
                    }
                    _ => {}
                }
            }
            Screen::WorkoutDetail => {
                let Some(workout) = self.app.nav().selections.detail_workout.clone() else {
                    return;
                };
                match key.code {
                    KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
                    KeyCode::Down => self.cursor = (self.cursor + 1).min(workout.exercises.len().saturating_sub(1)),
                    KeyCode::Enter => {
                        if let Some(ex) = workout.exercises.get(self.cursor) {
                            self.app.show_exercise(ex.clone());
                        }
                    }
                    KeyCode::Char('a') => self.app.request_schedule(workout),
                    KeyCode::Esc | KeyCode::Backspace => {
                        self.app.back();
                    }
                    _ => {}
                }
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.next(),
            KeyCode::BackTab | KeyCode::Up => form.prev(),
            KeyCode::Left => form.cycle_group(false),
            KeyCode::Right => form.cycle_group(true),
            KeyCode::Backspace => form.pop(),
            KeyCode::Char(c) => form.push(c),
            KeyCode::F(3) => form.add_row(),
            KeyCode::F(4) => {
                form.remove_row();
            }
            KeyCode::Enter => {
                if form.check_required()
                    && let Some(form) = self.form.take()
                {
                    self.app.save_draft(form.draft);
                    self.cursor = 0;
                }
            }
            KeyCode::Esc => {
                self.form = None;
                self.app.cancel_edit();
            }
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        let form = &mut self.login;
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.focus = (form.focus + 1) % form.fields.len(),
            KeyCode::BackTab | KeyCode::Up => form.focus = (form.focus + form.fields.len() - 1) % form.fields.len(),
            KeyCode::Backspace => {
                form.fields[form.focus].pop();
            }
            KeyCode::Char(c) => form.fields[form.focus].push(c),
            KeyCode::Enter => {
                let [name, email, password] = &form.fields;
                if self.app.login(email, password, name).is_ok() {
                    self.login = LoginForm::default();
                }
            }
            KeyCode::F(2) => self.app.login_with_google(),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }
}

fn flatten_plan(app: &App) -> Vec<(Day, ScheduledWorkout)> {
    app.plan()
        .plan()
        .days()
        .flat_map(|(day, list)| list.iter().map(move |s| (day, s.clone())))
        .collect()
}

fn render_levels(frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("Qual o seu nível de treino hoje?"), Line::from("")];
    lines.extend(
        TrainingLevel::all()
            .iter()
            .enumerate()
            .map(|(i, level)| Line::from(format!("[{}] {}", i + 1, level.label()))),
    );
    let levels = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Sua Intensidade"));
    frame.render_widget(levels, area);
}

fn render_day_picker(frame: &mut Frame, workout: &Workout) {
    let mut lines = vec![Line::from(format!("Adicionar \"{}\" em:", workout.name)), Line::from("")];
    lines.extend(
        Day::all()
            .iter()
            .enumerate()
            .map(|(i, day)| Line::from(format!("[{}] {}", i + 1, day))),
    );
    render_popup(frame, "Escolha o dia", lines);
}

fn render_confirm(frame: &mut Frame, question: &str) {
    render_popup(frame, "Confirmar", vec![Line::from(question.to_string())]);
}

fn render_popup(frame: &mut Frame, title: &str, lines: Vec<Line>) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// One-line description of how a media reference would be played
fn media_line(url: Option<&str>) -> String {
    let kind = media::classify(url);
    match &kind {
        MediaKind::YouTube(_) | MediaKind::Vimeo(_) => {
            format!("Vídeo: {}", media::embed_url(&kind, true).unwrap_or_default())
        }
        MediaKind::DirectVideo => "Vídeo direto".to_string(),
        MediaKind::Image => "Imagem".to_string(),
        MediaKind::Missing => "Sem mídia".to_string(),
    }
}

fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => "Login",
        Screen::Home => "Início",
        Screen::LevelSelect => "Nível",
        Screen::WorkoutList => "Treinos",
        Screen::WeeklyPlan => "Cronograma",
        Screen::AdminPanel => "Administração",
        Screen::WorkoutDetail => "Execução",
    }
}

fn key_hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => "tab: campo | enter: entrar | F2: Google | esc: sair",
        Screen::Home => "m/f: gênero | p: cronograma | a: admin | l: sair da conta | q: fechar",
        Screen::LevelSelect => "1-4: nível | esc: voltar",
        Screen::WorkoutList => "↑↓: navegar | enter: detalhes | a: adicionar ao plano | esc: voltar",
        Screen::WeeklyPlan => "↑↓: navegar | enter: detalhes | d: remover | c: limpar semana | esc: voltar",
        Screen::AdminPanel => "1-5: filtros | n: novo | e: editar | enter: detalhes | d: excluir | esc: voltar",
        Screen::WorkoutDetail => "↑↓: exercício | enter: explicação | a: adicionar ao plano | esc: voltar",
    }
}

const FORM_HINTS: &str = "tab/↑↓: campo | ←→: grupo | F3: + exercício | F4: - exercício | enter: salvar | esc: cancelar";

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStorage;
    use crossterm::event::KeyModifiers;
    use std::rc::Rc;

    fn press(tui: &mut TuiApp, code: KeyCode) {
        tui.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(tui: &mut TuiApp, text: &str) {
        for c in text.chars() {
            press(tui, KeyCode::Char(c));
        }
    }

    fn logged_in() -> TuiApp {
        let mut tui = TuiApp::new(App::new(Rc::new(MemoryStorage::new())));
        press(&mut tui, KeyCode::Tab);
        type_text(&mut tui, "ana@x.com");
        press(&mut tui, KeyCode::Tab);
        type_text(&mut tui, "123");
        press(&mut tui, KeyCode::Enter);
        tui
    }

    #[test]
    fn test_login_form() {
        let tui = logged_in();
        assert_eq!(tui.app.screen(), Screen::Home);
        assert_eq!(tui.app.session().unwrap().email, "ana@x.com");
    }

    #[test]
    fn test_add_workout_through_keys() {
        let mut tui = logged_in();
        press(&mut tui, KeyCode::Char('f'));
        press(&mut tui, KeyCode::Char('2'));
        assert_eq!(tui.app.screen(), Screen::WorkoutList);

        press(&mut tui, KeyCode::Char('a'));
        press(&mut tui, KeyCode::Char('3'));
        assert_eq!(tui.app.plan().day(Day::Wednesday).len(), 1);
    }

    #[test]
    fn test_clear_prompt_cancelled_by_other_key() {
        let mut tui = logged_in();
        press(&mut tui, KeyCode::Char('m'));
        press(&mut tui, KeyCode::Char('1'));
        press(&mut tui, KeyCode::Char('a'));
        press(&mut tui, KeyCode::Char('1'));
        press(&mut tui, KeyCode::Esc);
        press(&mut tui, KeyCode::Esc);
        press(&mut tui, KeyCode::Char('p'));
        assert_eq!(tui.app.screen(), Screen::WeeklyPlan);

        press(&mut tui, KeyCode::Char('c'));
        press(&mut tui, KeyCode::Char('n'));
        assert_eq!(tui.app.plan().total(), 1);

        press(&mut tui, KeyCode::Char('c'));
        press(&mut tui, KeyCode::Char('s'));
        assert_eq!(tui.app.plan().total(), 0);
    }

    fn signed_in_admin() -> TuiApp {
        let mut tui = TuiApp::new(App::new(Rc::new(MemoryStorage::new())));
        press(&mut tui, KeyCode::Tab);
        type_text(&mut tui, "treinofit@gmail.com");
        press(&mut tui, KeyCode::Tab);
        type_text(&mut tui, "admin");
        press(&mut tui, KeyCode::Enter);
        press(&mut tui, KeyCode::Char('a'));
        assert_eq!(tui.app.screen(), Screen::AdminPanel);
        tui
    }

    #[test]
    fn test_create_workout_through_form() {
        let mut tui = signed_in_admin();
        let len = tui.app.catalog().list().len();

        press(&mut tui, KeyCode::Char('n'));
        type_text(&mut tui, "Core");
        press(&mut tui, KeyCode::Tab);
        press(&mut tui, KeyCode::Right);
        press(&mut tui, KeyCode::Tab);
        press(&mut tui, KeyCode::Tab);
        type_text(&mut tui, "20 min");
        press(&mut tui, KeyCode::Tab);
        press(&mut tui, KeyCode::Tab);
        type_text(&mut tui, "Prancha");
        press(&mut tui, KeyCode::Tab);
        type_text(&mut tui, "3x30s");

        press(&mut tui, KeyCode::F(3));
        type_text(&mut tui, "Abdominal");
        press(&mut tui, KeyCode::F(3));
        press(&mut tui, KeyCode::F(4));
        press(&mut tui, KeyCode::Enter);

        assert!(tui.form.is_none());
        assert_eq!(tui.app.catalog().list().len(), len + 1);
        let saved = tui.app.catalog().list().last().unwrap();
        assert_eq!(saved.name, "Core");
        assert_eq!(saved.muscle_group, MuscleGroup::BackBiceps);
        assert_eq!(saved.duration, "20 min");
        let names: Vec<&str> = saved.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Prancha", "Abdominal"]);
        assert_eq!(saved.exercises[0].sets, "3x30s");
    }

    #[test]
    fn test_edit_workout_through_form() {
        let mut tui = signed_in_admin();
        let len = tui.app.catalog().list().len();
        let first = tui.app.filtered_workouts()[0].clone();

        press(&mut tui, KeyCode::Char('e'));
        assert!(tui.app.nav().selections.editing_workout.is_some());
        type_text(&mut tui, " II");
        press(&mut tui, KeyCode::Enter);

        assert!(tui.form.is_none());
        assert_eq!(tui.app.catalog().list().len(), len);
        assert_eq!(tui.app.catalog().get(&first.id).unwrap().name, format!("{} II", first.name));
        assert!(tui.app.nav().selections.editing_workout.is_none());
    }

    #[test]
    fn test_form_blank_name_then_cancel() {
        let mut tui = signed_in_admin();
        let len = tui.app.catalog().list().len();

        press(&mut tui, KeyCode::Char('n'));
        press(&mut tui, KeyCode::Enter);
        assert!(tui.form.is_some());

        // keys go to the form, not the admin list
        press(&mut tui, KeyCode::Char('d'));
        assert!(tui.app.nav().selections.delete_target.is_none());

        press(&mut tui, KeyCode::Esc);
        assert!(tui.form.is_none());
        assert_eq!(tui.app.screen(), Screen::AdminPanel);
        assert_eq!(tui.app.catalog().list().len(), len);
    }

    #[test]
    fn test_media_line() {
        assert_eq!(media_line(None), "Sem mídia");
        assert!(media_line(Some("https://vimeo.com/12345")).contains("player.vimeo.com"));
    }
}
