use crate::widgets::{UiBorder, UiContext};
use bevy::prelude::*;
use bevy::window::{CursorIcon, SystemCursorIcon};

#[derive(Component, Clone, Copy, Debug)]
pub struct UiButton;

pub fn default_button_setup(mut commands: Commands, query: Query<Entity, Added<UiButton>>) {
    for entity in query.iter() {
        commands.entity(entity).observe(
            move |_: On<Pointer<Over>>, mut cmds: Commands, ctx: UiContext| {
                cmds.entity(*ctx.window)
                    .insert(CursorIcon::System(SystemCursorIcon::Pointer));
            },
        );

        commands.entity(entity).observe(
            move |_: On<Pointer<Out>>, mut cmds: Commands, ctx: UiContext| {
                cmds.entity(*ctx.window)
                    .insert(CursorIcon::System(SystemCursorIcon::Default));
            },
        );
    }
}

#[derive(Component, Clone, Copy, Debug)]
pub struct GenericButton {
    pub current_color: Color,
    pub color: Color,
    pub hover_color: Color,
    pub press_color: Color,
    pub stay_active: bool,
}

#[derive(Component, Clone, Copy, Debug)]
pub struct Active;

pub struct ButtonBuilder {
    label: String,
    style: ButtonStyle,
    stay_active: bool,
}

#[derive(Clone, Debug)]
pub struct ButtonStyle {
    pub stretch: bool,
    pub color: Color,
    pub press_color: Color,
    pub hover_color: Color,
    pub label_color: Color,
    pub font_size: f32,
    pub border: Option<UiBorder>,
    pub padding: UiRect,
    pub margin: UiRect,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        ButtonStyle {
            stretch: false,
            color: Color::srgb(0.65, 0.65, 0.65),
            press_color: Color::srgb(0.55, 0.55, 0.55),
            hover_color: Color::srgb(0.75, 0.75, 0.75),
            label_color: Color::BLACK,
            font_size: 16.0,
            border: None,
            padding: UiRect::all(Val::Px(0.0)),
            margin: UiRect::all(Val::Px(0.0)),
        }
    }
}

impl ButtonBuilder {
    pub fn new(label: impl Into<String>) -> Self {
        ButtonBuilder {
            label: label.into(),
            style: ButtonStyle::default(),
            stay_active: false,
        }
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn stay_active(mut self, should_stay_active: bool) -> Self {
        self.stay_active = should_stay_active;
        self
    }

    pub fn spawn(&self, commands: &mut ChildSpawnerCommands) -> Entity {
        let width = if self.style.stretch {
            Val::Percent(100.0)
        } else {
            Val::Auto
        };
        let mut node = Node {
            width: width,
            height: Val::Auto,
            padding: self.style.padding,
            margin: self.style.margin,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            ..default()
        };
        let entity = commands
            .spawn((
                BackgroundColor(self.style.color),
                GenericButton {
                    current_color: self.style.color,
                    color: self.style.color,
                    hover_color: self.style.hover_color,
                    press_color: self.style.press_color,
                    stay_active: self.stay_active,
                },
                UiButton,
            ))
            .id();

        if let Some(border) = &self.style.border {
            node.border = border.size;
            commands
                .commands()
                .entity(entity)
                .insert((BorderColor::all(border.color), border.radius));
        }

        commands
            .commands()
            .entity(entity)
            .insert(node)
            .with_children(|container| {
                container.spawn((
                    Text::new(&self.label),
                    TextFont {
                        font_size: self.style.font_size,
                        ..default()
                    },
                    TextColor(self.style.label_color),
                ));
            });

        GenericButton::register_observers(entity, &mut commands.commands_mut());
        entity
    }
}

impl GenericButton {
    pub fn builder(label: impl Into<String>) -> ButtonBuilder {
        ButtonBuilder::new(label)
    }

    fn register_observers(entity: Entity, commands: &mut Commands) {
        commands
            .entity(entity)
            .observe(
                |trigger: On<Pointer<Over>>,
                 btn_query: Query<&GenericButton>,
                 mut commands: Commands| {
                    let entity = trigger.entity;
                    if let Ok(btn_comp) = btn_query.get(entity) {
                        commands
                            .entity(entity)
                            .insert(BackgroundColor(btn_comp.hover_color));
                    }
                },
            )
            .observe(
                |trigger: On<Pointer<Out>>,
                 btn_query: Query<&GenericButton>,
                 mut commands: Commands| {
                    let entity = trigger.entity;
                    if let Ok(btn_comp) = btn_query.get(entity) {
                        commands
                            .entity(entity)
                            .insert(BackgroundColor(btn_comp.current_color));
                    }
                },
            )
            .observe(
                |trigger: On<Pointer<Press>>,
                 btn_query: Query<&GenericButton>,
                 mut commands: Commands| {
                    let entity = trigger.entity;
                    if let Ok(btn_comp) = btn_query.get(entity) {
                        commands
                            .entity(entity)
                            .insert(BackgroundColor(btn_comp.press_color));
                    }
                },
            )
            .observe(
                |trigger: On<Pointer<Release>>,
                 btn_query: Query<&GenericButton>,
                 active_query: Query<&Active>,
                 mut commands: Commands| {
                    let entity = trigger.entity;
                    if let Ok(btn_comp) = btn_query.get(entity) {
                        commands
                            .entity(entity)
                            .insert(BackgroundColor(btn_comp.hover_color));

                        if btn_comp.stay_active {
                            if active_query.get(entity).is_ok() {
                                commands.entity(entity).remove::<Active>();
                            } else {
                                commands.entity(entity).insert(Active);
                            }
                        }
                    }
                },
            );
    }
}

// Add active component manually to a button if you want this effect or build it with stay_active(bool)
pub fn add_active_listener(
    mut commands: Commands,
    query: Query<Entity, Added<Active>>,
    mut btn_query: Query<&mut GenericButton>,
) {
    for entity in query.iter() {
        if let Ok(mut button_comp) = btn_query.get_mut(entity) {
            button_comp.current_color = button_comp.hover_color;
            commands
                .entity(entity)
                .insert(BackgroundColor(button_comp.current_color));
        }
    }
}

pub fn remove_active_listener(
    mut commands: Commands,
    mut removed: RemovedComponents<Active>,
    mut btn_query: Query<&mut GenericButton>,
) {
    for entity in removed.read() {
        if let Ok(mut button_comp) = btn_query.get_mut(entity) {
            button_comp.current_color = button_comp.color;
            commands
                .entity(entity)
                .insert(BackgroundColor(button_comp.current_color));
        }
    }
}
