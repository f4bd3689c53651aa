mod setting;
