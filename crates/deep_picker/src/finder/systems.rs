/*
 * Copyright (C) 2026 Open Source Robotics Foundation
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
*/

use bevy_ecs::prelude::*;
use bevy_input::prelude::*;
use bevy_window::{PrimaryWindow, Window};
use tracing::{debug, warn};

use crate::{
    finder::*,
    picking::{NoPick, PointPicker, UiRaycaster},
    session::PickSession,
};

/// Alt + right click inside the primary window asks for a deep pick at the
/// cursor.
pub fn request_deep_pick_on_gesture(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    primary_window: Query<&Window, With<PrimaryWindow>>,
    mut requests: EventWriter<DeepPickRequest>,
) {
    if !mouse_button_input.just_pressed(MouseButton::Right) {
        return;
    }

    if !keyboard_input.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]) {
        return;
    }

    let Ok(window) = primary_window.single() else {
        return;
    };

    if let Some(point) = window.cursor_position() {
        requests.write(DeepPickRequest { point });
    }
}

pub fn handle_deep_pick_requests(world: &mut World) {
    // Only the latest request in a frame matters.
    let Some(point) = world
        .resource_mut::<Events<DeepPickRequest>>()
        .drain()
        .last()
        .map(|request| request.point)
    else {
        return;
    };

    let previous = world.resource_mut::<ActiveDeepPick>().0.take();
    if let Some(previous) = previous {
        previous.close(world.resource::<DeepPicker>().pool());
    }

    let session = world.resource_scope::<PickBackends, _>(|world, mut backends| {
        let backends = &mut *backends;
        let mut no_point = NoPick;
        let mut no_ui = NoPick;
        let point_picker: &mut dyn PointPicker<Entity> = match backends.point.as_deref_mut() {
            Some(picker) => picker,
            None => {
                warn!("Deep pick requested but no point picker is installed in PickBackends");
                &mut no_point
            }
        };
        let ui_raycaster: &mut dyn UiRaycaster<Entity> = match backends.ui.as_deref_mut() {
            Some(raycaster) => raycaster,
            None => &mut no_ui,
        };

        let scene = WorldScene::new(world);
        PickSession::begin(
            &world.resource::<DeepPicker>().0,
            &scene,
            point_picker,
            ui_raycaster,
            point,
        )
    });

    let found = session.found_count();
    debug!("deep pick opened with {found} objects");
    world.resource_mut::<ActiveDeepPick>().0 = Some(session);
    world.send_event(DeepPickOpened { point, found });
}

pub fn handle_deep_pick_queries(
    mut queries: EventReader<DeepPickQuery>,
    picker: Res<DeepPicker>,
    mut active: ResMut<ActiveDeepPick>,
) {
    let Some(query) = queries.read().last() else {
        return;
    };

    if let Some(session) = active.0.as_mut() {
        session.set_query(&query.0, picker.filters());
    }
}

pub fn handle_deep_pick_toggles(
    mut toggles: EventReader<DeepPickToggle>,
    mut active: ResMut<ActiveDeepPick>,
) {
    let Some(session) = active.0.as_mut() else {
        toggles.clear();
        return;
    };

    for toggle in toggles.read() {
        session.toggle_expanded(toggle.0);
    }
}

/// Choosing a row pings its object. Choosing and closing both end the session
/// and return its items to the pool.
pub fn handle_deep_pick_choices(
    mut choices: EventReader<DeepPickChoose>,
    mut closes: EventReader<DeepPickClose>,
    picker: Res<DeepPicker>,
    mut active: ResMut<ActiveDeepPick>,
    mut ping: EventWriter<PingObject>,
) {
    let chosen = choices.read().last().map(|choice| choice.0);
    let closed = closes.read().count() > 0;
    if chosen.is_none() && !closed {
        return;
    }

    let Some(session) = active.0.take() else {
        return;
    };

    if let Some(object) = chosen
        .and_then(|id| session.item(id))
        .and_then(|item| item.object())
    {
        ping.write(PingObject(object));
    }

    session.close(picker.pool());
}

pub fn tick_deep_pick(world: &mut World) {
    let loading = world
        .resource::<ActiveDeepPick>()
        .0
        .as_ref()
        .is_some_and(|session| session.is_loading());
    if !loading {
        return;
    }

    world.resource_scope::<ActiveDeepPick, _>(|world, mut active| {
        if let Some(session) = active.0.as_mut() {
            let scene = WorldScene::new(world);
            session.tick(&scene, world.resource::<DeepPicker>().filters());
        }
    });
}

pub fn save_deep_picker_settings(
    mut saves: EventReader<SaveDeepPickerSettings>,
    mut picker: ResMut<DeepPicker>,
    path: Res<DeepPickerSettingsPath>,
) {
    let Some(save) = saves.read().last() else {
        return;
    };

    picker.apply_settings(save.0.clone());

    let Some(path) = path.0.as_ref() else {
        warn!("Unable to save deep picker settings: no configuration directory");
        return;
    };

    if let Err(err) = picker.settings().save_to(path) {
        warn!(
            "Unable to save deep picker settings to {}: {err}",
            path.display()
        );
    }
}
