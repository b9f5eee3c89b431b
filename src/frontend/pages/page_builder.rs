use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use wasm_bindgen::JsCast;

use crate::builder::{
    edit_path, load_page, pages_path, sanitize_html, BlockEvent, BlockRenderer, BuilderState,
    DragEnd, DragSensor, ImageBlockEditor, Key, KeyboardSensor, PageBuilder, Point, PointerSensor,
    Rect, SaveMode, TextBlockEditor, TextFormat, UploadState,
};
use crate::common::BuilderError;
use crate::frontend::components::{Button, ButtonVariant, ErrorAlert, Spinner};
use crate::frontend::AppContext;
use crate::models::{Block, BlockKind};
use crate::types::ImageFile;

type Builder = RwSignal<PageBuilder, LocalStorage>;

#[derive(Clone, PartialEq)]
enum Phase {
    Loading,
    Failed(BuilderError),
    Ready,
}

#[component]
pub fn PageBuilderPage(owner_id: String, page_id: String) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());
    let builder: Builder = RwSignal::new_local(PageBuilder::new(
        ctx.page_store(),
        ctx.subscriptions(),
    ));
    let notice: RwSignal<Option<&'static str>> = RwSignal::new(None);

    if let Some((generation, store, quota)) =
        builder.try_update(|b| (b.begin_initialize(&owner_id), b.store(), b.quota()))
    {
        let owner_id = owner_id.clone();
        spawn_local(async move {
            let result = load_page(store.as_ref(), quota.as_ref(), &owner_id, &page_id).await;
            builder.update(|b| b.finish_initialize(generation, result));
        });
    }

    let phase = Memo::new(move |_| {
        builder.with(|b| match b.state() {
            BuilderState::Loading => Phase::Loading,
            BuilderState::Error(err) => Phase::Failed(err.clone()),
            BuilderState::Ready(_) => Phase::Ready,
        })
    });

    let on_save = {
        let owner_id = owner_id.clone();
        move |()| {
            let Some((ticket, store)) = builder
                .try_update(|b| b.begin_save().map(|ticket| (ticket, b.store())))
                .flatten()
            else {
                return;
            };
            let owner_id = owner_id.clone();
            notice.set(None);

            spawn_local(async move {
                let created = ticket.mode() == &SaveMode::Create;
                let result = ticket.send(store.as_ref()).await;
                let saved = builder.try_update(|b| b.finish_save(ticket, result).is_ok());
                if saved != Some(true) {
                    return;
                }

                if created {
                    notice.set(Some("Page created successfully!"));
                    let page_id = builder.with_untracked(|b| b.page().map(|p| p.id.clone()));
                    if let Some(page_id) = page_id.filter(|id| id != "new") {
                        let target = edit_path(&owner_id, &page_id);
                        navigate.with_value(|nav| {
                            nav(
                                &target,
                                NavigateOptions {
                                    replace: true,
                                    ..Default::default()
                                },
                            )
                        });
                    }
                } else {
                    notice.set(Some("Page updated successfully!"));
                }
            });
        }
    };

    let back_href = pages_path(&owner_id);

    move || match phase.get() {
        Phase::Loading => view! { <Spinner /> }.into_any(),
        Phase::Failed(err) => {
            let upgrade = err.offers_upgrade();
            view! {
                <div class="flex h-screen items-center justify-center">
                    <div class="text-center">
                        <p class="mb-4 text-danger">{err.message}</p>
                        <div class="flex justify-center gap-4">
                            <a href=back_href.clone() class="rounded bg-primary px-4 py-2 text-white">
                                "Back to Pages"
                            </a>
                            <Show when=move || upgrade>
                                <a href="/subscription" class="rounded bg-success px-4 py-2 text-white">
                                    "Upgrade Plan"
                                </a>
                            </Show>
                        </div>
                    </div>
                </div>
            }
            .into_any()
        }
        Phase::Ready => view! {
            <EditorPanel builder=builder notice=notice on_save=Callback::new(on_save.clone()) />
        }
        .into_any(),
    }
}

#[derive(Clone, Copy)]
struct DragControls {
    pointer: StoredValue<PointerSensor>,
    keyboard: StoredValue<KeyboardSensor>,
    target: RwSignal<Option<usize>>,
    container: NodeRef<html::Div>,
}

impl DragControls {
    /// Current on-screen boxes of the blocks, in page order.
    fn layout(&self) -> Vec<Rect> {
        let Some(root) = self.container.get_untracked() else {
            return Vec::new();
        };
        let Ok(nodes) = root.query_selector_all("[data-block-id]") else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(|el| {
                let r = el.get_bounding_client_rect();
                Rect::new(r.x(), r.y(), r.width(), r.height())
            })
            .collect()
    }

    fn finish(&self, builder: Builder, end: Option<DragEnd>) {
        if let Some(DragEnd { from, to }) = end {
            builder.update(|b| {
                b.reorder(from, to);
            });
        }
    }
}

fn pointer_point(ev: &web_sys::PointerEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

#[component]
fn EditorPanel(
    builder: Builder,
    notice: RwSignal<Option<&'static str>>,
    on_save: Callback<()>,
) -> impl IntoView {
    let drag = DragControls {
        pointer: StoredValue::new(PointerSensor::new()),
        keyboard: StoredValue::new(KeyboardSensor::new()),
        target: RwSignal::new(None),
        container: NodeRef::new(),
    };

    let title = move || builder.with(|b| b.page().map(|p| p.title.clone()).unwrap_or_default());
    let blocks = move || builder.with(|b| b.page().map(|p| p.blocks.clone()).unwrap_or_default());
    let is_empty = move || builder.with(|b| b.page().is_none_or(|p| p.blocks.is_empty()));
    let saving = Signal::derive(move || builder.with(|b| b.is_saving()));
    let save_error = move || builder.with(|b| b.view().save_error.map(|e| e.message));

    let add = move |kind: BlockKind| {
        builder.update(|b| {
            b.add_block(kind);
        })
    };

    view! {
        <div class="rounded-sm border border-stroke bg-white shadow-default">
            <div class="border-b border-stroke px-6 py-4">
                <div class="flex flex-wrap items-center justify-between gap-4">
                    <div class="flex flex-1">
                        <input
                            type="text"
                            placeholder="Page Title"
                            prop:value=title
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                builder.update(|b| b.set_title(&value));
                            }
                            class="w-full rounded border-[1.5px] border-stroke bg-transparent px-5 py-3 font-medium outline-none focus:border-primary"
                        />
                    </div>
                    <div class="flex gap-4">
                        <Button on_click=Callback::new(move |_| add(BlockKind::Text))>"Add Text"</Button>
                        <Button on_click=Callback::new(move |_| add(BlockKind::Image))>"Add Image"</Button>
                        <Button
                            variant=ButtonVariant::Success
                            loading=saving
                            loading_text="Saving..."
                            on_click=on_save
                        >
                            "Save"
                        </Button>
                    </div>
                </div>
            </div>

            <div class="p-6">
                {move || save_error().map(|message| view! { <ErrorAlert message=message /> })}
                {move || notice.get().map(|message| view! {
                    <p class="mb-4 text-sm text-success">{message}</p>
                })}

                <div node_ref=drag.container class="space-y-4">
                    <For
                        each=blocks
                        key=|block| block.id.clone()
                        children=move |block| view! { <BlockItem block=block builder=builder drag=drag /> }
                    />
                </div>

                <Show when=is_empty>
                    <div class="py-8 text-center text-gray-500">
                        <p>"Add blocks to start building your page"</p>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn BlockItem(block: Block, builder: Builder, drag: DragControls) -> impl IntoView {
    let block_id = StoredValue::new(block.id.clone());
    let index = move || {
        builder.with_untracked(|b| {
            block_id.with_value(|id| b.page().and_then(|p| p.position_of(id)))
        })
    };
    let is_target = move || {
        let position =
            builder.with(|b| block_id.with_value(|id| b.page().and_then(|p| p.position_of(id))));
        position.is_some() && drag.target.get() == position
    };

    let body = match block.kind {
        BlockKind::Text => view! { <TextBlockView block=block.clone() builder=builder /> }.into_any(),
        BlockKind::Image => view! { <ImageBlockView block=block.clone() builder=builder /> }.into_any(),
    };

    let on_pointer_down = move |ev: web_sys::PointerEvent| {
        let Some(from) = index() else {
            return;
        };
        if let Some(handle) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        {
            if let Err(e) = handle.set_pointer_capture(ev.pointer_id()) {
                crate::log_err!(format!("{:?}", e), "pointer capture refused");
            }
        }
        let layout = drag.layout();
        drag.pointer
            .update_value(|s| s.on_drag_start(from, pointer_point(&ev), &layout));
    };

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let hovered = drag
            .pointer
            .try_update_value(|s| {
                s.on_drag_move(pointer_point(&ev));
                s.hovered()
            })
            .flatten();
        if drag.target.get_untracked() != hovered {
            drag.target.set(hovered);
        }
    };

    let on_pointer_up = move |ev: web_sys::PointerEvent| {
        let end = drag
            .pointer
            .try_update_value(|s| s.on_drag_end(pointer_point(&ev)))
            .flatten();
        drag.target.set(None);
        drag.finish(builder, end);
    };

    let on_key_down = move |ev: web_sys::KeyboardEvent| {
        let key = Key::from_dom(&ev.key());
        let dragging = drag.keyboard.with_value(|s| s.is_dragging());
        if key == Key::Other || !(dragging || matches!(key, Key::Space | Key::Enter)) {
            return;
        }
        let Some(focused) = index() else {
            return;
        };
        ev.prevent_default();

        let layout = drag.layout();
        let end = drag
            .keyboard
            .try_update_value(|s| s.handle_key(focused, key, &layout))
            .flatten();
        drag.target.set(drag.keyboard.with_value(|s| s.target()));
        drag.finish(builder, end);
    };

    view! {
        <div
            data-block-id=block.id.clone()
            class="relative flex items-center"
            class:drop-target=is_target
        >
            <div
                class="mr-2 cursor-move touch-none"
                role="button"
                tabindex="0"
                aria-label="Drag to reorder"
                on:pointerdown=on_pointer_down
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
                on:pointercancel=move |_| {
                    drag.pointer.update_value(|s| s.cancel());
                    drag.target.set(None);
                }
                on:keydown=on_key_down
            >
                <svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                    <line x1="4" y1="9" x2="20" y2="9"></line>
                    <line x1="4" y1="15" x2="20" y2="15"></line>
                </svg>
            </div>
            <div class="flex-grow">{body}</div>
        </div>
    }
}

#[component]
fn TextBlockView(block: Block, builder: Builder) -> impl IntoView {
    let editor = StoredValue::new_local(TextBlockEditor::new(&block));
    let surface: NodeRef<html::Div> = NodeRef::new();

    let on_input = move |_| {
        let Some(el) = surface.get_untracked() else {
            return;
        };
        let raw = el.inner_html();
        if let Some(event) = editor.try_update_value(|e| e.edit(&raw)) {
            builder.update(|b| b.apply(event));
        }
    };

    let format = move |format: TextFormat| {
        let Some(event) = editor.try_update_value(|e| e.apply_format(format)) else {
            return;
        };
        if let (Some(el), BlockEvent::Changed { content, .. }) = (surface.get_untracked(), &event) {
            el.set_inner_html(content);
        }
        builder.update(|b| b.apply(event));
    };

    let on_delete = move |_| {
        if let Some(event) = editor.try_with_value(|e| e.delete()) {
            builder.update(|b| b.apply(event));
        }
    };

    view! {
        <div class="rounded-sm border border-stroke bg-white p-4 shadow-default">
            <div class="mb-2 flex items-center space-x-2 border-b border-stroke p-2">
                {TextFormat::TOOLBAR
                    .into_iter()
                    .map(|f| view! {
                        <button type="button" class="rounded p-1 hover:bg-gray-100" on:click=move |_| format(f)>
                            {f.label()}
                        </button>
                    })
                    .collect_view()}
                <div class="mx-2 h-6 border-l border-stroke"></div>
                <button type="button" class="rounded p-1 hover:bg-danger hover:text-white" on:click=on_delete>
                    "Delete"
                </button>
            </div>
            <div
                node_ref=surface
                contenteditable="true"
                data-placeholder="Enter some text..."
                class="min-h-[100px] border p-2 focus:outline-none"
                inner_html=sanitize_html(&block.content)
                on:input=on_input
            ></div>
        </div>
    }
}

async fn read_file(file: &web_sys::File) -> Result<ImageFile, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(ImageFile::new(file.name(), file.type_(), bytes))
}

#[component]
fn ImageBlockView(block: Block, builder: Builder) -> impl IntoView {
    let editor = StoredValue::new_local(ImageBlockEditor::new(&block));
    let url = RwSignal::new(block.content.clone());
    let state = RwSignal::new(UploadState::Idle);
    let drag_over = RwSignal::new(false);

    let sync_state = move || {
        if let Some(current) = editor.try_with_value(|e| e.state().clone()) {
            state.set(current);
        }
    };

    let upload = move |file: web_sys::File| {
        let store = builder.with_untracked(|b| b.store());
        spawn_local(async move {
            let image = match read_file(&file).await {
                Ok(image) => image,
                Err(e) => {
                    crate::log_err!(e, "could not read picked file");
                    return;
                }
            };

            let started = editor
                .try_update_value(|e| e.begin_upload(&image).is_ok())
                .unwrap_or(false);
            sync_state();
            if !started {
                return;
            }

            let result = store.upload_image(&image).await;
            let event = editor.try_update_value(|e| e.finish_upload(result)).flatten();
            sync_state();
            if let Some(event) = event {
                if let BlockEvent::Changed { content, .. } = &event {
                    url.set(content.clone());
                }
                builder.update(|b| b.apply(event));
            }
        });
    };

    let on_pick = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            upload(file);
        }
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        drag_over.set(false);
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            upload(file);
        }
    };

    let on_delete = move |_| {
        if let Some(event) = editor.try_with_value(|e| e.delete()) {
            builder.update(|b| b.apply(event));
        }
    };

    view! {
        <div class="rounded-sm border border-stroke bg-white p-4 shadow-default">
            <div class="mb-2 flex justify-end">
                <button type="button" class="rounded p-1 hover:bg-danger hover:text-white" on:click=on_delete>
                    "Delete"
                </button>
            </div>
            <div
                class="relative rounded border-2 border-dashed p-4 text-center"
                class:border-primary=move || drag_over.get()
                on:dragover=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    drag_over.set(true);
                }
                on:dragleave=move |_| drag_over.set(false)
                on:drop=on_drop
            >
                {move || {
                    let current = url.get();
                    (!current.is_empty()).then(|| view! {
                        <img src=current alt="Uploaded content" class="mx-auto mb-4 max-h-96" />
                    })
                }}
                <label class="cursor-pointer text-primary">
                    {move || {
                        match state.get() {
                            UploadState::Uploading => "Uploading...",
                            _ if url.with(|u| u.is_empty()) => "Click or drop an image to upload",
                            _ => "Change Image",
                        }
                    }}
                    <input type="file" accept="image/*" class="hidden" on:change=on_pick />
                </label>
                {move || match state.get() {
                    UploadState::Failed(err) => Some(view! { <p class="mt-2 text-sm text-danger">{err.message}</p> }),
                    _ => None,
                }}
            </div>
        </div>
    }
}
