//! Node tree: everything that can appear beneath a container
//!
//! Items do not have to be direct children of their container. Any number
//! of `Group` nodes may sit in between, and a nested `SelectionContainer`
//! opens a new scope for the items beneath it.

use super::component::{Component, Handled, RenderContext};
use super::container::SelectionContainer;
use super::error::SelectError;
use super::item::SelectableItem;
use super::scope::Scope;
use super::state::ChoiceId;
use crate::style::{ClassList, GROUP_CLASS};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::Line,
    widgets::{Block, BorderType, Widget},
};

/// One node of a selection tree
#[derive(Debug)]
pub enum Node {
    Item(SelectableItem),
    Group(Group),
    Select(Box<SelectionContainer>),
    Text(Line<'static>),
}

impl Node {
    pub fn item(id: impl Into<ChoiceId>, content: impl Into<Line<'static>>) -> Self {
        Self::Item(SelectableItem::new(id, content))
    }

    pub fn text(content: impl Into<Line<'static>>) -> Self {
        Self::Text(content.into())
    }

    fn as_component(&self) -> Option<&dyn Component> {
        match self {
            Node::Item(item) => Some(item as &dyn Component),
            Node::Group(group) => Some(group as &dyn Component),
            Node::Select(select) => Some(select.as_ref() as &dyn Component),
            Node::Text(_) => None,
        }
    }

    /// Visit the items owned by the nearest container, in tree order
    ///
    /// Does not descend into nested containers.
    pub(crate) fn visit_items<'n>(&'n self, visit: &mut dyn FnMut(&'n SelectableItem)) {
        match self {
            Node::Item(item) => visit(item),
            Node::Group(group) => {
                for child in &group.children {
                    child.visit_items(visit);
                }
            }
            Node::Select(_) | Node::Text(_) => {}
        }
    }
}

impl Component for Node {
    fn height(&self) -> u16 {
        match self.as_component() {
            Some(component) => component.height(),
            None => 1,
        }
    }

    fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        ctx: &RenderContext<'_>,
    ) -> Result<(), SelectError> {
        match self {
            Node::Text(line) => {
                buf.set_line(area.x, area.y, line, area.width);
                Ok(())
            }
            _ => match self.as_component() {
                Some(component) => component.render(area, buf, ctx),
                None => Ok(()),
            },
        }
    }

    fn handle_click(&self, position: Position, scope: &Scope<'_>) -> Result<Handled, SelectError> {
        match self.as_component() {
            Some(component) => component.handle_click(position, scope),
            None => Ok(Handled::No),
        }
    }

    fn clear_layout(&self) {
        if let Some(component) = self.as_component() {
            component.clear_layout();
        }
    }
}

impl From<SelectableItem> for Node {
    fn from(item: SelectableItem) -> Self {
        Node::Item(item)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<SelectionContainer> for Node {
    fn from(select: SelectionContainer) -> Self {
        Node::Select(Box::new(select))
    }
}

impl From<Line<'static>> for Node {
    fn from(line: Line<'static>) -> Self {
        Node::Text(line)
    }
}

/// Titled wrapper that stacks its children vertically
///
/// Groups do not provide a scope of their own; children see the scope the
/// group was rendered in.
#[derive(Debug, Default)]
pub struct Group {
    title: Option<String>,
    bordered: bool,
    classes: ClassList,
    children: Vec<Node>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn bordered(mut self) -> Self {
        self.bordered = true;
        self
    }

    pub fn class(mut self, classes: impl Into<ClassList>) -> Self {
        self.classes = classes.into();
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Rows taken by the border or the title line
    fn chrome(&self) -> u16 {
        if self.bordered {
            2
        } else if self.title.is_some() {
            1
        } else {
            0
        }
    }
}

impl Component for Group {
    fn height(&self) -> u16 {
        self.chrome().saturating_add(stack_height(&self.children))
    }

    fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        ctx: &RenderContext<'_>,
    ) -> Result<(), SelectError> {
        let style = ctx.sheet.compose(GROUP_CLASS, &self.classes, None);

        let inner = if self.bordered {
            let mut block = Block::bordered()
                .border_type(BorderType::Plain)
                .style(style);
            if let Some(title) = &self.title {
                block = block.title(title.as_str());
            }
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            buf.set_style(area, style);
            match &self.title {
                Some(title) if area.height > 0 => {
                    buf.set_string(area.x, area.y, title, style);
                    Rect {
                        y: area.y + 1,
                        height: area.height - 1,
                        ..area
                    }
                }
                _ => area,
            }
        };

        render_nodes(&self.children, inner, buf, ctx)
    }

    fn handle_click(&self, position: Position, scope: &Scope<'_>) -> Result<Handled, SelectError> {
        dispatch_click(&self.children, position, scope)
    }

    fn clear_layout(&self) {
        for child in &self.children {
            child.clear_layout();
        }
    }
}

/// Total rows needed to stack `nodes`
pub(crate) fn stack_height(nodes: &[Node]) -> u16 {
    nodes
        .iter()
        .fold(0u16, |total, node| total.saturating_add(node.height()))
}

/// Stack `nodes` top to bottom inside `area`
///
/// Nodes that do not fit are not drawn and forget their previous layout.
/// An item reached without an enclosing container aborts the render with
/// `MissingContainerScope`.
pub fn render_nodes(
    nodes: &[Node],
    area: Rect,
    buf: &mut Buffer,
    ctx: &RenderContext<'_>,
) -> Result<(), SelectError> {
    let bottom = area.y.saturating_add(area.height);
    let mut y = area.y;

    for node in nodes {
        if y >= bottom {
            node.clear_layout();
            continue;
        }
        let height = node.height().min(bottom - y);
        let slot = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        node.render(slot, buf, ctx)?;
        y = y.saturating_add(height);
    }

    Ok(())
}

/// Offer a pointer activation to each node until one handles it
pub fn dispatch_click(
    nodes: &[Node],
    position: Position,
    scope: &Scope<'_>,
) -> Result<Handled, SelectError> {
    for node in nodes {
        if node.handle_click(position, scope)?.was_handled() {
            return Ok(Handled::Yes);
        }
    }
    Ok(Handled::No)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleSheet;

    #[test]
    fn test_group_height() {
        let plain = Group::new().child(Node::item("1", "a")).child(Node::item("2", "b"));
        assert_eq!(plain.height(), 2);

        let titled = Group::new().title("Fruit").child(Node::item("1", "a"));
        assert_eq!(titled.height(), 2);

        let bordered = Group::new()
            .bordered()
            .title("Fruit")
            .child(Node::item("1", "a"));
        assert_eq!(bordered.height(), 3);
    }

    #[test]
    fn test_visit_items_skips_nested_containers() {
        let nested = SelectionContainer::builder()
            .option("inner", "Inner")
            .build()
            .unwrap();
        let group = Node::from(
            Group::new()
                .child(Node::item("a", "A"))
                .child(nested)
                .child(Group::new().child(Node::item("b", "B"))),
        );

        let mut ids = Vec::new();
        group.visit_items(&mut |item| ids.push(item.id().to_string()));
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_root_level_item_fails() {
        let sheet = StyleSheet::default();
        let nodes = vec![Node::text("Pick one"), Node::item("1", "Hello")];
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);

        let result = render_nodes(&nodes, area, &mut buf, &RenderContext::new(&sheet));
        assert_eq!(result, Err(SelectError::MissingContainerScope));
    }

    #[test]
    fn test_root_level_group_without_items_renders() {
        let sheet = StyleSheet::default();
        let nodes = vec![Node::from(Group::new().title("Empty").bordered())];
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);

        assert_eq!(
            render_nodes(&nodes, area, &mut buf, &RenderContext::new(&sheet)),
            Ok(())
        );
    }

    #[test]
    fn test_dispatch_misses_return_no() {
        let nodes = vec![Node::text("label")];
        assert_eq!(
            dispatch_click(&nodes, Position::new(0, 0), &Scope::root()),
            Ok(Handled::No)
        );
    }
}
